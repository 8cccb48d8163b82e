//! Conflict matcher: one ingredient's facts against one profile.
//!
//! Rules are evaluated in a fixed order and every rule that fires appends
//! one reason:
//!
//! 1. allergy    — fact allergen category in `profile.allergies`
//! 2. diet       — fact diet conflict in `profile.dietary_restrictions`
//! 3. condition  — fact condition flag in `profile.health_conditions`
//! 4. base       — inherent `base_severity`, profile-independent
//! 5. goal       — fact goal conflict in `profile.health_goals`
//!
//! The tier only ever rises and the final severity is the maximum over the
//! rules that fired.

use tracing::debug;

use labelscan_contracts::{
    ingredient::IngredientFact,
    profile::UserProfile,
    scan::{FlaggedIngredient, RiskLevel},
    token::humanize,
};

/// Severity of a confirmed allergen match.
pub const ALLERGY_SEVERITY: f64 = 1.0;
/// Severity of a dietary-preference conflict.
pub const DIET_SEVERITY: f64 = 0.6;
/// Severity of a health-condition conflict.
pub const CONDITION_SEVERITY: f64 = 0.6;
/// Severity of a health-goal conflict.
pub const GOAL_SEVERITY: f64 = 0.3;

/// `base_severity` at or above this flags an ingredient on its own.
pub const BASE_SEVERITY_FLAG_THRESHOLD: f64 = 0.6;
/// `base_severity` at or above this forces the High tier.
pub const BASE_SEVERITY_HIGH_THRESHOLD: f64 = 0.85;

const BASE_SEVERITY_REASON: &str = "Ultra-processed / high-risk ingredient";

/// Accumulates fired rules for one ingredient.
struct Verdict {
    tier: RiskLevel,
    severity: f64,
    reasons: Vec<String>,
}

impl Verdict {
    fn new() -> Self {
        Self {
            tier: RiskLevel::Low,
            severity: 0.0,
            reasons: Vec::new(),
        }
    }

    fn fire(&mut self, tier: RiskLevel, severity: f64, reason: String) {
        self.tier = self.tier.max(tier);
        self.severity = self.severity.max(severity);
        self.reasons.push(reason);
    }

    fn fired(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// Evaluate every rule for `name`.
///
/// `fact` is `None` when the knowledge base has no entry; the caller records
/// such names as unknown and this returns `None`. `profile` is `None` for an
/// unpersonalized scan, in which case only the base-severity rule applies.
///
/// Returns `None` when no rule fired.
pub fn match_ingredient(
    name: &str,
    fact: Option<&IngredientFact>,
    profile: Option<&UserProfile>,
) -> Option<FlaggedIngredient> {
    let fact = fact?;
    let display_name = humanize(name);
    let mut verdict = Verdict::new();

    if let Some(profile) = profile {
        for category in fact.allergen_categories.intersection(profile.allergies()) {
            debug!(ingredient = %name, category = %category, "allergen match");
            verdict.fire(
                RiskLevel::High,
                ALLERGY_SEVERITY,
                format!(
                    "Contains {}, a known {} allergen",
                    display_name,
                    humanize(category)
                ),
            );
        }

        for diet in fact.diet_conflicts.intersection(profile.dietary_restrictions()) {
            debug!(ingredient = %name, diet = %diet, "diet conflict");
            verdict.fire(
                RiskLevel::Medium,
                DIET_SEVERITY,
                format!("Conflicts with your {} preference", humanize(diet)),
            );
        }

        for condition in fact.condition_flags.intersection(profile.health_conditions()) {
            debug!(ingredient = %name, condition = %condition, "condition conflict");
            verdict.fire(
                RiskLevel::Medium,
                CONDITION_SEVERITY,
                format!("May worsen your {} condition", humanize(condition)),
            );
        }
    }

    let base = fact.base_severity;
    if base >= BASE_SEVERITY_FLAG_THRESHOLD && !verdict.fired() {
        debug!(ingredient = %name, base_severity = base, "base severity flag");
        verdict.fire(RiskLevel::Medium, base, BASE_SEVERITY_REASON.to_string());
    }
    // Very high base severity raises an already-flagged ingredient too, but
    // adds no second reason.
    if base >= BASE_SEVERITY_HIGH_THRESHOLD {
        verdict.tier = RiskLevel::High;
        verdict.severity = verdict.severity.max(base);
    }

    if let Some(profile) = profile {
        for goal in fact.goal_conflicts.intersection(profile.health_goals()) {
            debug!(ingredient = %name, goal = %goal, "goal conflict");
            verdict.fire(
                RiskLevel::Low,
                GOAL_SEVERITY,
                format!("Works against your {} goal", humanize(goal)),
            );
        }
    }

    if !verdict.fired() {
        return None;
    }

    Some(FlaggedIngredient {
        ingredient: name.to_string(),
        risk_level: verdict.tier,
        reasons: verdict.reasons,
        severity: verdict.severity,
    })
}
