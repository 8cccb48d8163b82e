//! User profile: the four constraint sets a scan is personalized against.
//!
//! Tokens are normalized at this boundary (on construction and on
//! deserialization) so the matcher can compare them with plain set lookups.
//! Fields are private to keep that invariant; use the `with_*` builders.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::token::{deserialize_token_set, token_set};

/// One person's dietary constraints.
///
/// Every set holds unique, lowercase, underscore-separated tokens. Empty sets
/// are valid and mean "no constraints of this kind".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "deserialize_token_set")]
    allergies: BTreeSet<String>,

    #[serde(default, deserialize_with = "deserialize_token_set")]
    dietary_restrictions: BTreeSet<String>,

    #[serde(default, deserialize_with = "deserialize_token_set")]
    health_conditions: BTreeSet<String>,

    #[serde(default, deserialize_with = "deserialize_token_set")]
    health_goals: BTreeSet<String>,
}

impl UserProfile {
    /// A profile with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allergies<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allergies.extend(token_set(tokens));
        self
    }

    pub fn with_dietary_restrictions<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dietary_restrictions.extend(token_set(tokens));
        self
    }

    pub fn with_health_conditions<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.health_conditions.extend(token_set(tokens));
        self
    }

    pub fn with_health_goals<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.health_goals.extend(token_set(tokens));
        self
    }

    pub fn allergies(&self) -> &BTreeSet<String> {
        &self.allergies
    }

    pub fn dietary_restrictions(&self) -> &BTreeSet<String> {
        &self.dietary_restrictions
    }

    pub fn health_conditions(&self) -> &BTreeSet<String> {
        &self.health_conditions
    }

    pub fn health_goals(&self) -> &BTreeSet<String> {
        &self.health_goals
    }

    /// True when no constraint of any kind is declared.
    pub fn is_empty(&self) -> bool {
        self.allergies.is_empty()
            && self.dietary_restrictions.is_empty()
            && self.health_conditions.is_empty()
            && self.health_goals.is_empty()
    }
}
