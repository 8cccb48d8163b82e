//! Scan request and result types.
//!
//! `AnalyzeResult` is the wire contract consumed by the presentation layer:
//! field names and JSON types must not change.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::profile::UserProfile;

/// One scoring request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanInput {
    /// Free-text ingredient strings in label order. May contain duplicates,
    /// OCR noise, and terms the knowledge base has never seen.
    pub raw_ingredients: Vec<String>,

    /// `None` scores without personalization: only base severity applies.
    pub profile: Option<UserProfile>,
}

impl ScanInput {
    pub fn new<I, S>(raw_ingredients: I, profile: Option<UserProfile>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            raw_ingredients: raw_ingredients.into_iter().map(Into::into).collect(),
            profile,
        }
    }
}

/// Three-tier risk label, used both per ingredient and for the whole product.
///
/// Ordered `Low < Medium < High` so tiers can be raised with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// The label shown to users and sent over the wire.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One ingredient that conflicts with the profile or is inherently risky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedIngredient {
    /// Normalized ingredient name.
    pub ingredient: String,

    pub risk_level: RiskLevel,

    /// One entry per triggered rule, in rule evaluation order.
    pub reasons: Vec<String>,

    /// Contribution weight in [0, 1].
    pub severity: f64,
}

/// Final output of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResult {
    /// 0–100, higher is safer. Kept as a float; serialized rounded.
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,

    pub risk_classification: RiskLevel,

    /// Descending severity, ties in first-seen order.
    pub flagged_ingredients: Vec<FlaggedIngredient>,

    /// Normalized names with no knowledge-base match, first-seen order, unique.
    pub unknown_ingredients: Vec<String>,

    pub summary: String,

    /// Ingredient count after normalization and de-duplication.
    pub total_ingredients: usize,

    pub conflict_count: usize,

    /// Base64 speech rendering of `summary`, when requested and available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
}

impl AnalyzeResult {
    /// The score as presented to users: rounded to the nearest integer.
    pub fn display_score(&self) -> u8 {
        rounded_score(self.score)
    }
}

fn rounded_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

fn serialize_score<S>(score: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(rounded_score(*score))
}
