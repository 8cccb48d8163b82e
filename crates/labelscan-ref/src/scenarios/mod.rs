//! Reference runtime demo scenarios.
//!
//! Each scenario wires the real labelscan components (knowledge base,
//! scoring engine, contract verifier, scan pipeline) to the mock
//! collaborators and walks one label through the full pipeline.

use std::sync::Arc;

use labelscan_contracts::{error::LabelscanResult, scan::AnalyzeResult};
use labelscan_core::ScanPipeline;
use labelscan_engine::ScoringEngine;
use labelscan_knowledge::KnowledgeBase;
use labelscan_verify::ContractVerifier;

use crate::mock_data::{InMemoryProfileStore, TextLabelVision, TranscriptSpeech};

pub mod allergy_alert;
pub mod anonymous_scan;
pub mod diet_conflict;

/// The pipeline every scenario runs: bundled knowledge base, mock
/// collaborators, real engine and verifier.
pub fn reference_pipeline() -> LabelscanResult<ScanPipeline> {
    let kb = Arc::new(KnowledgeBase::bundled()?);
    Ok(ScanPipeline::new(
        Box::new(TextLabelVision),
        Box::new(InMemoryProfileStore::demo()),
        Box::new(TranscriptSpeech),
        Box::new(ScoringEngine::new(kb)),
        Box::new(ContractVerifier::new()),
    ))
}

/// Print a result the same way in every scenario.
pub(crate) fn print_result(result: &AnalyzeResult) {
    println!(
        "  Score:                  {} / 100 ({})",
        result.display_score(),
        result.risk_classification
    );
    println!(
        "  Ingredients analyzed:   {} ({} conflict(s), {} unknown)",
        result.total_ingredients,
        result.conflict_count,
        result.unknown_ingredients.len()
    );
    for flagged in &result.flagged_ingredients {
        println!(
            "    [{}] {} (severity {:.2})",
            flagged.risk_level, flagged.ingredient, flagged.severity
        );
        for reason in &flagged.reasons {
            println!("        - {}", reason);
        }
    }
    if !result.unknown_ingredients.is_empty() {
        println!("  Unknown:                {}", result.unknown_ingredients.join(", "));
    }
    println!("  Summary:                {}", result.summary);
}
