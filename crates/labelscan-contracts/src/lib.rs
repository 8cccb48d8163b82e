//! # labelscan-contracts
//!
//! Shared types, the `AnalyzeResult` wire contract, and error types for the
//! labelscan ingredient risk engine.
//!
//! All crates in the workspace import from here. No scoring logic lives in
//! this crate, only data definitions, token canonicalization, and errors.

pub mod error;
pub mod ingredient;
pub mod profile;
pub mod scan;
pub mod token;
pub mod verify;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use error::LabelscanError;
    use profile::UserProfile;
    use scan::{AnalyzeResult, FlaggedIngredient, RiskLevel};
    use token::{normalize_profile_token, normalize_token};

    // ── Token canonicalization ───────────────────────────────────────────────

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_token("  Peanut    Oil\t"), "peanut_oil");
        assert_eq!(normalize_token("HIGH FRUCTOSE corn syrup"), "high_fructose_corn_syrup");
    }

    #[test]
    fn normalize_strips_punctuation_but_keeps_hyphens() {
        assert_eq!(normalize_token("sugar, (cane)."), "sugar_cane");
        assert_eq!(normalize_token("semi-sweet chips*"), "semi-sweet_chips");
    }

    #[test]
    fn normalize_is_empty_for_pure_noise() {
        assert_eq!(normalize_token(""), "");
        assert_eq!(normalize_token("   "), "");
        assert_eq!(normalize_token("*** -- ."), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_token("Vitamin B12 (Cyanocobalamin)");
        assert_eq!(normalize_token(&once), once);
    }

    #[test]
    fn profile_tokens_turn_hyphens_into_underscores() {
        assert_eq!(normalize_profile_token("Gluten-Free"), "gluten_free");
        assert_eq!(normalize_profile_token("tree nuts"), "tree_nuts");
    }

    // ── UserProfile boundary normalization ───────────────────────────────────

    #[test]
    fn profile_builders_normalize_and_dedupe() {
        let profile = UserProfile::new()
            .with_allergies(["Peanuts", "peanuts ", "Tree Nuts"])
            .with_dietary_restrictions(["gluten-free"]);

        let allergies: Vec<&str> = profile.allergies().iter().map(String::as_str).collect();
        assert_eq!(allergies, vec!["peanuts", "tree_nuts"]);
        assert!(profile.dietary_restrictions().contains("gluten_free"));
        assert!(profile.health_goals().is_empty());
    }

    #[test]
    fn profile_deserialization_normalizes_and_defaults_missing_sets() {
        let profile: UserProfile = serde_json::from_value(json!({
            "allergies": ["Shellfish", " ", "SHELLFISH"],
            "health_conditions": ["High Blood-Pressure"]
        }))
        .unwrap();

        assert_eq!(profile.allergies().len(), 1);
        assert!(profile.allergies().contains("shellfish"));
        assert!(profile.health_conditions().contains("high_blood_pressure"));
        assert!(profile.dietary_restrictions().is_empty());
        assert!(!profile.is_empty());
    }

    #[test]
    fn empty_profile_is_empty() {
        assert!(UserProfile::new().is_empty());
        assert!(UserProfile::new().with_allergies(["", "  "]).is_empty());
    }

    // ── RiskLevel ────────────────────────────────────────────────────────────

    #[test]
    fn risk_level_orders_low_to_high() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(RiskLevel::Low.max(RiskLevel::High), RiskLevel::High);
    }

    #[test]
    fn risk_level_wire_labels() {
        assert_eq!(serde_json::to_value(RiskLevel::Low).unwrap(), json!("Low Risk"));
        assert_eq!(serde_json::to_value(RiskLevel::Medium).unwrap(), json!("Medium Risk"));
        assert_eq!(serde_json::to_value(RiskLevel::High).unwrap(), json!("High Risk"));
        assert_eq!(RiskLevel::High.to_string(), "High Risk");
    }

    // ── AnalyzeResult wire shape ─────────────────────────────────────────────

    fn sample_result(score: f64, audio: Option<&str>) -> AnalyzeResult {
        AnalyzeResult {
            score,
            risk_classification: RiskLevel::Medium,
            flagged_ingredients: vec![FlaggedIngredient {
                ingredient: "sugar".to_string(),
                risk_level: RiskLevel::Medium,
                reasons: vec!["May worsen your diabetes condition".to_string()],
                severity: 0.6,
            }],
            unknown_ingredients: vec!["zorbitol".to_string()],
            summary: "summary".to_string(),
            total_ingredients: 3,
            conflict_count: 1,
            audio_base64: audio.map(str::to_string),
        }
    }

    #[test]
    fn score_serializes_rounded_to_integer() {
        let value = serde_json::to_value(sample_result(66.666, None)).unwrap();
        assert_eq!(value["score"], json!(67));
        assert_eq!(value["risk_classification"], json!("Medium Risk"));
        assert_eq!(value["flagged_ingredients"][0]["risk_level"], json!("Medium Risk"));
    }

    #[test]
    fn display_score_keeps_internal_precision_separate() {
        let result = sample_result(79.5, None);
        assert_eq!(result.display_score(), 80);
        assert_eq!(result.score, 79.5);
    }

    #[test]
    fn audio_field_is_omitted_when_absent() {
        let without = serde_json::to_value(sample_result(50.0, None)).unwrap();
        assert!(without.get("audio_base64").is_none());

        let with = serde_json::to_value(sample_result(50.0, Some("AAAA"))).unwrap();
        assert_eq!(with["audio_base64"], json!("AAAA"));
    }

    #[test]
    fn wire_field_names_are_stable() {
        let value = serde_json::to_value(sample_result(90.0, None)).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "conflict_count",
                "flagged_ingredients",
                "risk_classification",
                "score",
                "summary",
                "total_ingredients",
                "unknown_ingredients",
            ]
        );
    }

    // ── LabelscanError ───────────────────────────────────────────────────────

    #[test]
    fn error_status_codes() {
        assert_eq!(LabelscanError::EmptyImage.status_code(), 400);
        assert_eq!(LabelscanError::NoIngredients.status_code(), 422);
        assert_eq!(
            LabelscanError::VisionFailed { reason: "timeout".to_string() }.status_code(),
            502
        );
        assert_eq!(
            LabelscanError::VerificationFailed { reason: "x".to_string() }.status_code(),
            500
        );
    }

    #[test]
    fn error_body_carries_display_message() {
        let err = LabelscanError::VisionFailed {
            reason: "upstream returned 503".to_string(),
        };
        let body = serde_json::to_value(err.body()).unwrap();
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("ingredient extraction failed"));
        assert!(detail.contains("upstream returned 503"));
    }

    #[test]
    fn error_knowledge_base_display() {
        let err = LabelscanError::KnowledgeBase {
            reason: "duplicate key 'salt'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("knowledge base error"));
        assert!(msg.contains("salt"));
    }

    // ── VerificationReport ───────────────────────────────────────────────────

    #[test]
    fn report_summary_joins_failures() {
        let report = verify::VerificationReport::from_failures(vec![
            verify::VerificationFailure {
                check_id: "score-range".to_string(),
                message: "score 120 outside [0, 100]".to_string(),
            },
            verify::VerificationFailure {
                check_id: "conflict-count".to_string(),
                message: "mismatch".to_string(),
            },
        ]);
        assert!(!report.passed);
        assert_eq!(
            report.summary(),
            "[score-range] score 120 outside [0, 100]; [conflict-count] mismatch"
        );
        assert!(verify::VerificationReport::from_failures(vec![]).passed);
    }
}
