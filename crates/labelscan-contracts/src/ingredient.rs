//! Knowledge-base entry type.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::token::deserialize_token_set;

/// Static risk facts about one ingredient.
///
/// Loaded once with the knowledge base and never modified afterwards. The
/// token sets are normalized the same way as `UserProfile` tokens so that the
/// matcher compares like with like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientFact {
    /// Normalized ingredient name, unique within a knowledge base.
    pub key: String,

    /// Allergen categories this ingredient triggers (e.g. `"peanuts"`).
    #[serde(default, deserialize_with = "deserialize_token_set")]
    pub allergen_categories: BTreeSet<String>,

    /// Diets this ingredient violates (e.g. `"vegan"`).
    #[serde(default, deserialize_with = "deserialize_token_set")]
    pub diet_conflicts: BTreeSet<String>,

    /// Health conditions this ingredient worsens (e.g. `"diabetes"`).
    #[serde(default, deserialize_with = "deserialize_token_set")]
    pub condition_flags: BTreeSet<String>,

    /// Health goals this ingredient works against (e.g. `"weight_loss"`).
    #[serde(default, deserialize_with = "deserialize_token_set")]
    pub goal_conflicts: BTreeSet<String>,

    /// Inherent risk in [0, 1], independent of any profile.
    #[serde(default)]
    pub base_severity: f64,
}

impl IngredientFact {
    /// A fact with no conflicts and zero base severity.
    pub fn neutral(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            allergen_categories: BTreeSet::new(),
            diet_conflicts: BTreeSet::new(),
            condition_flags: BTreeSet::new(),
            goal_conflicts: BTreeSet::new(),
            base_severity: 0.0,
        }
    }
}
