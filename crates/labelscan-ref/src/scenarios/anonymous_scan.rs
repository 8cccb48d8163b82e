//! Scenario 3: Anonymous Scan with Audio
//!
//! A signed-out shopper scans a cherry soda and asks for the result to be
//! read aloud.
//!
//! Pipeline walk-through for the demo run:
//!   1. No user id → the profile store is never consulted
//!   2. Only inherent base severity applies: high fructose corn syrup and
//!      Red 40 are flagged as ultra-processed
//!   3. Caffeine is unknown to the knowledge base
//!   4. The summary is synthesized and attached as base64 audio
//!
//! The same label is also scanned by a signed-in user without a saved
//! profile, which must score identically.

use labelscan_contracts::{error::LabelscanResult, scan::AnalyzeResult};
use labelscan_core::ScanRequest;

use crate::mock_data::{NEW_USER, SODA_LABEL};
use crate::scenarios::{print_result, reference_pipeline};

/// Run Scenario 3: Anonymous Scan with Audio.
pub fn run_scenario() -> LabelscanResult<AnalyzeResult> {
    println!("=== Scenario 3: Anonymous Scan with Audio ===");
    println!();
    println!("  Shopper:  (signed out)");
    println!("  Label:    {}", SODA_LABEL);
    println!();

    let pipeline = reference_pipeline()?;
    let result = pipeline.analyze(ScanRequest::new(SODA_LABEL, "text/plain").with_audio(true))?;

    print_result(&result);
    let audio_len = result.audio_base64.as_ref().map_or(0, String::len);
    println!("  Audio:                  {} base64 chars", audio_len);
    println!();

    // A signed-in user with no saved profile gets the same answer.
    let no_profile = pipeline.analyze(ScanRequest::new(SODA_LABEL, "text/plain").with_user(NEW_USER))?;
    println!(
        "  Same label, {} without a saved profile: {} / 100 ({})",
        NEW_USER,
        no_profile.display_score(),
        no_profile.risk_classification
    );
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(result)
}
