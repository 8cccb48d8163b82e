//! Knowledge-base document schema.
//!
//! A `KnowledgeDocument` is deserialized from TOML and holds the ingredient
//! facts plus an alias table. It is raw input: keys and aliases are not yet
//! normalized or validated. `KnowledgeBase::from_document` does both.
//!
//! Example:
//! ```toml
//! [aliases]
//! "vitamin b12" = "cyanocobalamin"
//!
//! [[ingredients]]
//! key = "peanut oil"
//! allergen_categories = ["peanuts"]
//! goal_conflicts = ["weight_loss"]
//! base_severity = 0.2
//!
//! [[ingredients]]
//! key = "cyanocobalamin"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use labelscan_contracts::ingredient::IngredientFact;

/// The top-level structure deserialized from a knowledge-base TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// Synonym → canonical ingredient name. Both sides are label text.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Ingredient facts in declaration order.
    #[serde(default)]
    pub ingredients: Vec<IngredientFact>,
}
