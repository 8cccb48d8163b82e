//! Contract verifier for scan results.
//!
//! `ContractVerifier` implements the `ResultVerifier` trait from
//! `labelscan-core`. Verification runs in two phases:
//!
//! 1. **Structural** — the serialized `AnalyzeResult` is validated against
//!    [`analyze_result_schema`] using the `jsonschema` crate.
//! 2. **Semantic** — the built-in invariant checks run in order, followed by
//!    any host-registered checks. All failures are collected before
//!    returning so the full failure set is visible in one pass.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use tracing::{debug, warn};

use labelscan_contracts::{
    error::LabelscanResult,
    scan::AnalyzeResult,
    verify::{VerificationFailure, VerificationReport},
};
use labelscan_core::traits::ResultVerifier;
use labelscan_engine::aggregate::classify;

use crate::schema::{analyze_result_schema, SCHEMA_ID};

/// A host-supplied check.
///
/// Returns `Some(message)` when the result fails, `None` on success.
pub type CustomCheckFn = Box<dyn Fn(&AnalyzeResult) -> Option<String> + Send + Sync>;

type BuiltinCheck = fn(&AnalyzeResult) -> Option<String>;

/// Built-in semantic checks, in evaluation order.
const BUILTIN_CHECKS: &[(&str, BuiltinCheck)] = &[
    ("score-range", check_score_range),
    ("classification", check_classification),
    ("conflict-count", check_conflict_count),
    ("flagged-order", check_flagged_order),
    ("severity-range", check_severity_range),
    ("flagged-unknown-overlap", check_flagged_unknown_overlap),
    ("unknown-unique", check_unknown_unique),
    ("ingredient-count", check_ingredient_count),
];

/// The labelscan result verifier.
pub struct ContractVerifier {
    schema: Value,
    /// Registered by name; a `BTreeMap` keeps their run order stable.
    custom_checks: BTreeMap<String, CustomCheckFn>,
}

impl ContractVerifier {
    /// A verifier for the current wire schema with no custom checks.
    pub fn new() -> Self {
        Self::with_schema(analyze_result_schema())
    }

    /// A verifier using a different schema document. A `null` schema
    /// disables the structural phase.
    pub fn with_schema(schema: Value) -> Self {
        Self {
            schema,
            custom_checks: BTreeMap::new(),
        }
    }

    /// Register a custom check under `name`. Registering the same name twice
    /// replaces the previous check.
    pub fn register_check(&mut self, name: impl Into<String>, check: CustomCheckFn) {
        self.custom_checks.insert(name.into(), check);
    }

    fn structural_failures(&self, result: &AnalyzeResult) -> Vec<VerificationFailure> {
        if self.schema.is_null() {
            return Vec::new();
        }

        let payload = match serde_json::to_value(result) {
            Ok(v) => v,
            Err(e) => {
                return vec![failure("json-schema", format!("result is not serializable: {e}"))];
            }
        };

        match jsonschema::validator_for(&self.schema) {
            Ok(validator) => validator
                .iter_errors(&payload)
                .map(|error| {
                    let message =
                        format!("JSON Schema violation at {}: {}", error.instance_path, error);
                    warn!(schema_id = SCHEMA_ID, %message, "structural validation failure");
                    failure("json-schema", message)
                })
                .collect(),
            Err(e) => {
                let message = format!("invalid JSON Schema document: {e}");
                warn!(schema_id = SCHEMA_ID, %message, "schema compilation failure");
                vec![failure("json-schema", message)]
            }
        }
    }
}

impl Default for ContractVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultVerifier for ContractVerifier {
    fn verify(&self, result: &AnalyzeResult) -> LabelscanResult<VerificationReport> {
        // ── Phase 1: JSON Schema structural validation ────────────────────────
        let mut failures = self.structural_failures(result);

        // ── Phase 2: Semantic checks ─────────────────────────────────────────
        let builtin = BUILTIN_CHECKS
            .iter()
            .map(|(id, check)| (*id, check(result)));
        let custom = self
            .custom_checks
            .iter()
            .map(|(id, check)| (id.as_str(), check(result)));

        for (check_id, outcome) in builtin.chain(custom) {
            debug!(check_id, "evaluating verification check");
            if let Some(message) = outcome {
                warn!(check_id, %message, "semantic check failed");
                failures.push(failure(check_id, message));
            }
        }

        let report = VerificationReport::from_failures(failures);
        debug!(
            schema_id = SCHEMA_ID,
            passed = report.passed,
            failure_count = report.failures.len(),
            "verification complete"
        );
        Ok(report)
    }
}

fn failure(check_id: &str, message: String) -> VerificationFailure {
    VerificationFailure {
        check_id: check_id.to_string(),
        message,
    }
}

// ── Built-in checks ───────────────────────────────────────────────────────────

fn check_score_range(result: &AnalyzeResult) -> Option<String> {
    let score = result.score;
    if score.is_finite() && (0.0..=100.0).contains(&score) {
        None
    } else {
        Some(format!("score {score} outside [0, 100]"))
    }
}

/// The class must be the one the unrounded score maps to.
fn check_classification(result: &AnalyzeResult) -> Option<String> {
    if !result.score.is_finite() {
        return None; // reported by score-range
    }
    let expected = classify(result.score);
    if expected == result.risk_classification {
        None
    } else {
        Some(format!(
            "score {} classifies as '{}' but result says '{}'",
            result.score, expected, result.risk_classification
        ))
    }
}

fn check_conflict_count(result: &AnalyzeResult) -> Option<String> {
    let flagged = result.flagged_ingredients.len();
    if result.conflict_count == flagged {
        None
    } else {
        Some(format!(
            "conflict_count is {} but {} ingredients are flagged",
            result.conflict_count, flagged
        ))
    }
}

fn check_flagged_order(result: &AnalyzeResult) -> Option<String> {
    result
        .flagged_ingredients
        .windows(2)
        .find(|pair| pair[0].severity < pair[1].severity)
        .map(|pair| {
            format!(
                "'{}' (severity {}) is listed before '{}' (severity {})",
                pair[0].ingredient, pair[0].severity, pair[1].ingredient, pair[1].severity
            )
        })
}

fn check_severity_range(result: &AnalyzeResult) -> Option<String> {
    result
        .flagged_ingredients
        .iter()
        .find(|f| !(0.0..=1.0).contains(&f.severity))
        .map(|f| format!("'{}' has severity {} outside [0, 1]", f.ingredient, f.severity))
}

fn check_flagged_unknown_overlap(result: &AnalyzeResult) -> Option<String> {
    let unknown: HashSet<&str> = result
        .unknown_ingredients
        .iter()
        .map(String::as_str)
        .collect();
    result
        .flagged_ingredients
        .iter()
        .find(|f| unknown.contains(f.ingredient.as_str()))
        .map(|f| format!("'{}' is both flagged and unknown", f.ingredient))
}

fn check_unknown_unique(result: &AnalyzeResult) -> Option<String> {
    let mut seen = HashSet::new();
    result
        .unknown_ingredients
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(|name| format!("'{}' is listed as unknown more than once", name))
}

/// Flagged and unknown ingredients are disjoint subsets of the working set.
fn check_ingredient_count(result: &AnalyzeResult) -> Option<String> {
    let accounted = result.flagged_ingredients.len() + result.unknown_ingredients.len();
    if accounted <= result.total_ingredients {
        None
    } else {
        Some(format!(
            "{} flagged + unknown ingredients exceed total_ingredients {}",
            accounted, result.total_ingredients
        ))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use labelscan_contracts::{
        profile::UserProfile,
        scan::{AnalyzeResult, FlaggedIngredient, RiskLevel, ScanInput},
    };
    use labelscan_core::traits::ResultVerifier;
    use labelscan_engine::ScoringEngine;
    use labelscan_knowledge::KnowledgeBase;

    use super::ContractVerifier;

    // ── Builder helpers ───────────────────────────────────────────────────────

    fn flagged(name: &str, level: RiskLevel, severity: f64) -> FlaggedIngredient {
        FlaggedIngredient {
            ingredient: name.to_string(),
            risk_level: level,
            reasons: vec!["May worsen your diabetes condition".to_string()],
            severity,
        }
    }

    /// A consistent result: two flagged, one unknown, five total.
    fn valid_result() -> AnalyzeResult {
        AnalyzeResult {
            score: 64.0,
            risk_classification: RiskLevel::Medium,
            flagged_ingredients: vec![
                flagged("high_fructose_corn_syrup", RiskLevel::Medium, 0.7),
                flagged("sugar", RiskLevel::Medium, 0.6),
            ],
            unknown_ingredients: vec!["zorbitol".to_string()],
            summary: "Detected 5 ingredients. Found 2 conflicts, most notably high fructose \
                      corn syrup and sugar. Overall risk: Medium Risk."
                .to_string(),
            total_ingredients: 5,
            conflict_count: 2,
            audio_base64: None,
        }
    }

    fn failed_checks(result: &AnalyzeResult) -> Vec<String> {
        let report = ContractVerifier::new().verify(result).unwrap();
        report.failures.into_iter().map(|f| f.check_id).collect()
    }

    // ── Structural ────────────────────────────────────────────────────────────

    #[test]
    fn test_valid_result_passes() {
        let report = ContractVerifier::new().verify(&valid_result()).unwrap();
        assert!(report.passed, "expected pass, failures: {:?}", report.failures);
    }

    #[test]
    fn test_audio_field_is_allowed() {
        let mut result = valid_result();
        result.audio_base64 = Some("UklGRg==".to_string());
        assert!(failed_checks(&result).is_empty());
    }

    /// An empty summary or an ingredient with no reasons breaks the schema.
    #[test]
    fn test_schema_rejects_empty_strings_and_reasons() {
        let mut result = valid_result();
        result.summary = String::new();
        result.flagged_ingredients[1].reasons.clear();

        let failures = failed_checks(&result);
        assert_eq!(failures.iter().filter(|id| *id == "json-schema").count(), 2);
    }

    #[test]
    fn test_malformed_schema_is_a_failure_not_a_panic() {
        let verifier = ContractVerifier::with_schema(json!({ "type": 12 }));
        let report = verifier.verify(&valid_result()).unwrap();

        assert!(!report.passed);
        assert!(report.failures[0].message.contains("invalid JSON Schema document"));
    }

    #[test]
    fn test_null_schema_skips_structural_phase() {
        let mut result = valid_result();
        result.summary = String::new();

        let report = ContractVerifier::with_schema(serde_json::Value::Null)
            .verify(&result)
            .unwrap();
        assert!(report.passed);
    }

    // ── Semantic ──────────────────────────────────────────────────────────────

    #[test]
    fn test_score_out_of_range() {
        let mut result = valid_result();
        result.score = 140.0;
        result.risk_classification = RiskLevel::Low;

        let failures = failed_checks(&result);
        assert!(failures.contains(&"score-range".to_string()));
        assert!(!failures.contains(&"classification".to_string()));
    }

    #[test]
    fn test_classification_must_match_score() {
        let mut result = valid_result();
        result.score = 79.6; // rounds to 80 on the wire, still Medium
        assert!(failed_checks(&result).is_empty());

        result.risk_classification = RiskLevel::Low;
        assert_eq!(failed_checks(&result), vec!["classification"]);
    }

    #[test]
    fn test_conflict_count_mismatch() {
        let mut result = valid_result();
        result.conflict_count = 3;
        assert_eq!(failed_checks(&result), vec!["conflict-count"]);
    }

    #[test]
    fn test_flagged_must_be_descending() {
        let mut result = valid_result();
        result.flagged_ingredients.reverse();
        assert_eq!(failed_checks(&result), vec!["flagged-order"]);
    }

    #[test]
    fn test_flagged_and_unknown_are_disjoint() {
        let mut result = valid_result();
        result.unknown_ingredients.push("sugar".to_string());
        assert_eq!(failed_checks(&result), vec!["flagged-unknown-overlap"]);
    }

    #[test]
    fn test_duplicate_unknowns_rejected() {
        let mut result = valid_result();
        result.unknown_ingredients.push("zorbitol".to_string());
        assert_eq!(failed_checks(&result), vec!["unknown-unique"]);
    }

    #[test]
    fn test_counts_cannot_exceed_total() {
        let mut result = valid_result();
        result.total_ingredients = 2;
        assert_eq!(failed_checks(&result), vec!["ingredient-count"]);
    }

    /// Every failure is reported, not only the first.
    #[test]
    fn test_all_failures_collected() {
        let mut result = valid_result();
        result.conflict_count = 0;
        result.flagged_ingredients[0].severity = 1.5;

        let failures = failed_checks(&result);
        assert!(failures.contains(&"json-schema".to_string()));
        assert!(failures.contains(&"conflict-count".to_string()));
        assert!(failures.contains(&"severity-range".to_string()));
    }

    // ── Custom checks ─────────────────────────────────────────────────────────

    #[test]
    fn test_custom_check_runs_after_builtins() {
        let mut verifier = ContractVerifier::new();
        verifier.register_check(
            "summary-mentions-class",
            Box::new(|result| {
                if result.summary.contains(result.risk_classification.label()) {
                    None
                } else {
                    Some("summary does not state the classification".to_string())
                }
            }),
        );

        assert!(verifier.verify(&valid_result()).unwrap().passed);

        let mut result = valid_result();
        result.summary = "Something else entirely.".to_string();
        let report = verifier.verify(&result).unwrap();
        assert!(!report.passed);
        assert_eq!(report.failures[0].check_id, "summary-mentions-class");
    }

    // ── Engine output ─────────────────────────────────────────────────────────

    /// Whatever the engine produces from the bundled data passes.
    #[test]
    fn test_engine_results_pass() {
        let engine = ScoringEngine::new(Arc::new(KnowledgeBase::bundled().unwrap()));
        let verifier = ContractVerifier::new();
        let profile = UserProfile::new()
            .with_allergies(["peanuts", "milk"])
            .with_dietary_restrictions(["vegan"])
            .with_health_conditions(["diabetes", "hypertension"])
            .with_health_goals(["weight_loss"]);

        let labels: [&[&str]; 4] = [
            &[],
            &["Peanut Oil", "Sugar", "Salt"],
            &["water", "mystery powder", "Mystery Powder", "HFCS", "Red 40"],
            &["whole milk", "cane sugar", "sea salt", "partially hydrogenated oil"],
        ];
        for raw in labels {
            for p in [None, Some(profile.clone())] {
                let result = engine.evaluate(&ScanInput::new(raw.iter().copied(), p));
                let report = verifier.verify(&result).unwrap();
                assert!(report.passed, "{:?}: {}", raw, report.summary());
            }
        }
    }
}
