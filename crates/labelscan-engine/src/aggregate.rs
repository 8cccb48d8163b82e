//! Severity aggregation and score classification.

use labelscan_contracts::scan::{FlaggedIngredient, RiskLevel};

/// Scores at or above this are Low Risk.
pub const LOW_RISK_THRESHOLD: f64 = 80.0;
/// Scores at or above this (and below `LOW_RISK_THRESHOLD`) are Medium Risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 50.0;

/// Ceiling applied when any ingredient is a critical hit.
pub const CRITICAL_SCORE_CAP: f64 = 20.0;

pub const MAX_SCORE: f64 = 100.0;

/// Per-tier multiplier applied to an ingredient's severity.
pub fn tier_weight(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::High => 1.0,
        RiskLevel::Medium => 0.6,
        RiskLevel::Low => 0.3,
    }
}

/// A High-tier ingredient at full severity, i.e. a confirmed allergen.
///
/// One such ingredient caps the product score no matter how many harmless
/// ingredients dilute the average.
pub fn is_critical(flagged: &FlaggedIngredient) -> bool {
    flagged.risk_level == RiskLevel::High && flagged.severity >= 1.0
}

/// Fold per-ingredient severities into a 0–100 score and its class.
///
/// `penalty = Σ(severity × tier_weight) / total` and
/// `score = clamp(100 − 100 × penalty, 0, 100)`, then capped at
/// [`CRITICAL_SCORE_CAP`] if any ingredient [`is_critical`]. The terms are
/// summed in ascending order so the result does not depend on the order of
/// `flagged`.
///
/// `total == 0` scores 100 (nothing to evaluate is safe).
pub fn aggregate(flagged: &[FlaggedIngredient], total: usize) -> (f64, RiskLevel) {
    if total == 0 {
        return (MAX_SCORE, classify(MAX_SCORE));
    }

    let mut terms: Vec<f64> = flagged
        .iter()
        .map(|f| f.severity * tier_weight(f.risk_level))
        .collect();
    terms.sort_by(f64::total_cmp);
    let penalty = terms.iter().sum::<f64>() / total as f64;

    let mut score = (MAX_SCORE - penalty * MAX_SCORE).clamp(0.0, MAX_SCORE);
    if flagged.iter().any(is_critical) {
        score = score.min(CRITICAL_SCORE_CAP);
    }

    (score, classify(score))
}

/// Map a score to its risk class. Operates on the unrounded score.
pub fn classify(score: f64) -> RiskLevel {
    if score >= LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}
