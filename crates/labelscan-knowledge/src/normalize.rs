//! Ingredient normalizer: free text from the vision collaborator → lookup key.

use tracing::debug;

use labelscan_contracts::token::normalize_token;

use crate::base::KnowledgeBase;

impl KnowledgeBase {
    /// Canonicalize a raw ingredient string into a knowledge-base key.
    ///
    /// Applies [`normalize_token`] and then resolves synonyms through the
    /// alias table. Returns `None` when the input is empty after stripping;
    /// such inputs are dropped from the working set rather than reported as
    /// unknown. A non-empty result that is not a known key is returned as-is
    /// so the caller can record it as unknown.
    ///
    /// Pure and deterministic: no locale dependence, no state.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let token = normalize_token(raw);
        if token.is_empty() {
            return None;
        }

        match self.aliases.get(&token) {
            Some(canonical) => {
                debug!(alias = %token, canonical = %canonical, "resolved ingredient alias");
                Some(canonical.clone())
            }
            None => Some(token),
        }
    }
}
