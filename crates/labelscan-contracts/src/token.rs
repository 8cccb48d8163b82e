//! Token canonicalization shared by profiles and the knowledge base.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};

/// Canonicalize free text into an ingredient lookup key.
///
/// Lowercases, drops punctuation other than hyphens, and joins the remaining
/// words with single underscores. Returns an empty string when nothing is
/// left; callers treat that as "drop this input".
///
/// ```
/// use labelscan_contracts::token::normalize_token;
///
/// assert_eq!(normalize_token("  Soy Lecithin (Emulsifier) "), "soy_lecithin_emulsifier");
/// assert_eq!(normalize_token("semi-sweet chocolate"), "semi-sweet_chocolate");
/// assert_eq!(normalize_token("!!! -- ,"), "");
/// ```
pub fn normalize_token(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in raw.chars() {
        if ch.is_alphanumeric() || ch == '-' {
            current.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '_' {
            push_word(&mut words, std::mem::take(&mut current));
        }
        // anything else is punctuation and is dropped in place
    }
    push_word(&mut words, current);

    words.join("_")
}

/// A bare run of hyphens is not a word.
fn push_word(words: &mut Vec<String>, word: String) {
    if word.chars().any(char::is_alphanumeric) {
        words.push(word);
    }
}

/// Canonicalize a profile or fact token (`"Gluten-Free"` → `"gluten_free"`).
///
/// Same as [`normalize_token`] but hyphens become underscores as well, since
/// profile tokens are underscore-separated by contract.
pub fn normalize_profile_token(raw: &str) -> String {
    normalize_token(&raw.replace('-', " "))
}

/// Render a token for human-facing text (`"tree_nuts"` → `"tree nuts"`).
pub fn humanize(token: &str) -> String {
    token.replace('_', " ")
}

/// Collect tokens into a normalized set, dropping ones that normalize to "".
pub fn token_set<I, S>(tokens: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|t| normalize_profile_token(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Serde helper: deserialize a list of strings into a normalized token set.
pub(crate) fn deserialize_token_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    Ok(token_set(raw))
}
