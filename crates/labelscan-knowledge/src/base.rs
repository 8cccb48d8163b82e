//! The immutable ingredient knowledge base.
//!
//! `KnowledgeBase` is built once at process start from a TOML document and
//! never modified afterwards. It holds no interior mutability, so a single
//! value can be shared behind an `Arc` by any number of concurrent scans.
//!
//! Construction validates the whole document up front:
//!
//! 1. Every ingredient key is normalized; empty keys and duplicates are rejected.
//! 2. `base_severity` must be a finite number in [0, 1].
//! 3. Every alias is normalized on both sides. An alias must point at a
//!    declared ingredient and must not shadow one.
//!
//! Any violation is a `LabelscanError::KnowledgeBase`. The engine cannot run
//! without valid reference data, so callers treat this as a startup failure.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use labelscan_contracts::{
    error::{LabelscanError, LabelscanResult},
    ingredient::IngredientFact,
    token::normalize_token,
};

use crate::document::KnowledgeDocument;

/// The knowledge base shipped with the crate.
const BUNDLED_KNOWLEDGE_BASE: &str = include_str!("../data/default.toml");

/// Static reference data mapping normalized ingredient keys to risk facts.
///
/// ```rust,ignore
/// use labelscan_knowledge::KnowledgeBase;
///
/// let kb = KnowledgeBase::from_file(Path::new("data/knowledge.toml"))?;
/// let key = kb.normalize("Vitamin B12").unwrap();
/// assert_eq!(key, "cyanocobalamin");
/// ```
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    facts: HashMap<String, IngredientFact>,
    pub(crate) aliases: HashMap<String, String>,
    fingerprint: String,
}

impl KnowledgeBase {
    /// Load the knowledge base bundled with this crate.
    pub fn bundled() -> LabelscanResult<Self> {
        Self::from_toml_str(BUNDLED_KNOWLEDGE_BASE)
    }

    /// Parse `s` as TOML and build a validated `KnowledgeBase`.
    pub fn from_toml_str(s: &str) -> LabelscanResult<Self> {
        let document: KnowledgeDocument =
            toml::from_str(s).map_err(|e| LabelscanError::KnowledgeBase {
                reason: format!("failed to parse knowledge base TOML: {}", e),
            })?;
        Self::from_document(document)
    }

    /// Read the file at `path` and parse it as a knowledge-base document.
    pub fn from_file(path: &Path) -> LabelscanResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| LabelscanError::KnowledgeBase {
                reason: format!("failed to read knowledge base '{}': {}", path.display(), e),
            })?;
        Self::from_toml_str(&contents)
    }

    /// Normalize and validate an already-parsed document.
    pub fn from_document(document: KnowledgeDocument) -> LabelscanResult<Self> {
        let mut facts: HashMap<String, IngredientFact> =
            HashMap::with_capacity(document.ingredients.len());

        for (index, mut fact) in document.ingredients.into_iter().enumerate() {
            let key = normalize_token(&fact.key);
            if key.is_empty() {
                return Err(invalid(format!(
                    "ingredient #{} has an empty key ('{}')",
                    index, fact.key
                )));
            }
            if !fact.base_severity.is_finite() || !(0.0..=1.0).contains(&fact.base_severity) {
                return Err(invalid(format!(
                    "ingredient '{}' has base_severity {} outside [0, 1]",
                    key, fact.base_severity
                )));
            }
            if facts.contains_key(&key) {
                return Err(invalid(format!("duplicate ingredient key '{}'", key)));
            }
            fact.key = key.clone();
            facts.insert(key, fact);
        }

        let mut aliases: HashMap<String, String> = HashMap::with_capacity(document.aliases.len());
        for (raw_alias, raw_target) in document.aliases {
            let alias = normalize_token(&raw_alias);
            let target = normalize_token(&raw_target);
            if alias.is_empty() || target.is_empty() {
                return Err(invalid(format!(
                    "alias '{}' -> '{}' normalizes to an empty name",
                    raw_alias, raw_target
                )));
            }
            if facts.contains_key(&alias) {
                return Err(invalid(format!(
                    "alias '{}' shadows an ingredient of the same name",
                    alias
                )));
            }
            if !facts.contains_key(&target) {
                return Err(invalid(format!(
                    "alias '{}' points at unknown ingredient '{}'",
                    alias, target
                )));
            }
            if let Some(previous) = aliases.insert(alias.clone(), target.clone()) {
                if previous != target {
                    return Err(invalid(format!(
                        "alias '{}' maps to both '{}' and '{}'",
                        alias, previous, target
                    )));
                }
            }
        }

        let fingerprint = fingerprint(&facts, &aliases)?;

        info!(
            ingredients = facts.len(),
            aliases = aliases.len(),
            fingerprint = %fingerprint,
            "knowledge base loaded"
        );

        Ok(Self {
            facts,
            aliases,
            fingerprint,
        })
    }

    /// Look up the facts for an already-normalized key.
    pub fn lookup(&self, key: &str) -> Option<&IngredientFact> {
        self.facts.get(key)
    }

    /// Number of ingredient facts (aliases not counted).
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// All ingredient keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.facts.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Lowercase hex SHA-256 over the normalized content.
    ///
    /// Two knowledge bases with the same fingerprint score every input
    /// identically, regardless of how their source documents were formatted.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn invalid(reason: String) -> LabelscanError {
    LabelscanError::KnowledgeBase { reason }
}

/// Canonical, order-independent view of the content used for hashing.
#[derive(Serialize)]
struct CanonicalContent<'a> {
    facts: BTreeMap<&'a str, &'a IngredientFact>,
    aliases: BTreeMap<&'a str, &'a str>,
}

fn fingerprint(
    facts: &HashMap<String, IngredientFact>,
    aliases: &HashMap<String, String>,
) -> LabelscanResult<String> {
    let content = CanonicalContent {
        facts: facts.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        aliases: aliases.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect(),
    };
    let bytes = serde_json::to_vec(&content).map_err(|e| LabelscanError::KnowledgeBase {
        reason: format!("failed to serialize knowledge base for fingerprinting: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
