//! Scenario 1: Allergy Alert
//!
//! A shopper with a peanut allergy scans a snack mix fried in peanut oil.
//!
//! Pipeline walk-through for the demo run:
//!   1. Vision stub reads three ingredients off the label
//!   2. Profile store returns the shopper's peanut allergy
//!   3. Peanut oil matches the allergy → High tier, severity 1.0
//!   4. The critical hit caps the score at 20 even though the other two
//!      ingredients are harmless
//!   5. Verifier passes the result

use labelscan_contracts::{error::LabelscanResult, scan::AnalyzeResult};
use labelscan_core::ScanRequest;

use crate::mock_data::{PEANUT_ALLERGY_USER, SNACK_MIX_LABEL};
use crate::scenarios::{print_result, reference_pipeline};

/// Run Scenario 1: Allergy Alert.
pub fn run_scenario() -> LabelscanResult<AnalyzeResult> {
    println!("=== Scenario 1: Allergy Alert ===");
    println!();
    println!("  Shopper:  {} (allergies: peanuts)", PEANUT_ALLERGY_USER);
    println!("  Label:    {}", SNACK_MIX_LABEL);
    println!();

    let pipeline = reference_pipeline()?;
    let request = ScanRequest::new(SNACK_MIX_LABEL, "text/plain").with_user(PEANUT_ALLERGY_USER);
    let result = pipeline.analyze(request)?;

    print_result(&result);
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(result)
}

#[cfg(test)]
mod tests {
    use labelscan_contracts::scan::RiskLevel;

    use super::run_scenario;

    #[test]
    fn test_peanut_oil_is_a_critical_hit() {
        let result = run_scenario().unwrap();

        assert_eq!(result.total_ingredients, 3);
        assert_eq!(result.conflict_count, 1);
        assert_eq!(result.risk_classification, RiskLevel::High);
        assert_eq!(result.display_score(), 20);

        let hit = &result.flagged_ingredients[0];
        assert_eq!(hit.ingredient, "peanut_oil");
        assert_eq!(hit.severity, 1.0);
        assert_eq!(hit.reasons, vec!["Contains peanut oil, a known peanuts allergen"]);
        assert!(result.summary.contains("most notably peanut oil"));
    }
}
