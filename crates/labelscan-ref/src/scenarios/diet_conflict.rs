//! Scenario 2: Diet & Condition Conflicts
//!
//! A vegan shopper managing diabetes and high blood pressure, who is also
//! trying to lose weight, scans a loaf of sandwich bread.
//!
//! Pipeline walk-through for the demo run:
//!   1. Vision stub reads seven ingredients off the label
//!   2. Profile store returns diet, condition, and goal constraints
//!   3. Wheat flour, sugar, and salt worsen a condition; whey breaks the
//!      vegan diet; palm oil works against the weight-loss goal
//!   4. "Natural flavor" is not in the knowledge base and is reported as
//!      unknown rather than guessed at
//!   5. Five moderate conflicts over seven ingredients land in Medium Risk

use labelscan_contracts::{error::LabelscanResult, scan::AnalyzeResult};
use labelscan_core::ScanRequest;

use crate::mock_data::{BREAD_LABEL, VEGAN_DIABETIC_USER};
use crate::scenarios::{print_result, reference_pipeline};

/// Run Scenario 2: Diet & Condition Conflicts.
pub fn run_scenario() -> LabelscanResult<AnalyzeResult> {
    println!("=== Scenario 2: Diet & Condition Conflicts ===");
    println!();
    println!(
        "  Shopper:  {} (vegan; diabetes, hypertension; goal: weight loss)",
        VEGAN_DIABETIC_USER
    );
    println!("  Label:    {}", BREAD_LABEL);
    println!();

    let pipeline = reference_pipeline()?;
    let request = ScanRequest::new(BREAD_LABEL, "text/plain").with_user(VEGAN_DIABETIC_USER);
    let result = pipeline.analyze(request)?;

    print_result(&result);
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(result)
}
