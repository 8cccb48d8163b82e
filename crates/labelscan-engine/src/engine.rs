//! The scoring engine: normalizer → matcher → aggregator → summary.
//!
//! `ScoringEngine` implements the `RiskScorer` trait from labelscan-core.
//!
//! Scoring algorithm:
//!
//! 1. Normalize every raw string through the knowledge base. Inputs that
//!    normalize to nothing are dropped; repeats keep their first position.
//! 2. For each remaining name, look up its facts. No facts → unknown.
//!    Otherwise run the conflict matcher against the profile.
//! 3. Sort flagged ingredients by descending severity (stable, so ties keep
//!    first-seen order).
//! 4. Aggregate into a score and classify it.
//! 5. Generate the summary.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use labelscan_contracts::scan::{AnalyzeResult, ScanInput};
use labelscan_core::traits::RiskScorer;
use labelscan_knowledge::KnowledgeBase;

use crate::{aggregate::aggregate, matcher::match_ingredient, summary::summarize};

/// A `RiskScorer` backed by an immutable knowledge base.
///
/// Cheap to clone; clones share the knowledge base.
///
/// ```rust,ignore
/// use labelscan_engine::ScoringEngine;
///
/// let engine = ScoringEngine::new(Arc::new(KnowledgeBase::bundled()?));
/// let result = engine.evaluate(&ScanInput::new(["Peanut Oil", "Sugar"], None));
/// ```
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    kb: Arc<KnowledgeBase>,
}

impl ScoringEngine {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Score one input. Never fails; the result carries unknowns instead.
    pub fn evaluate(&self, input: &ScanInput) -> AnalyzeResult {
        let names = self.working_set(&input.raw_ingredients);
        let profile = input.profile.as_ref();

        let mut flagged = Vec::new();
        let mut unknown_ingredients = Vec::new();

        for name in &names {
            match self.kb.lookup(name) {
                None => {
                    debug!(ingredient = %name, "no knowledge-base entry");
                    unknown_ingredients.push(name.clone());
                }
                Some(fact) => {
                    if let Some(hit) = match_ingredient(name, Some(fact), profile) {
                        flagged.push(hit);
                    }
                }
            }
        }

        flagged.sort_by(|a, b| b.severity.total_cmp(&a.severity));

        let total_ingredients = names.len();
        let (score, risk_classification) = aggregate(&flagged, total_ingredients);
        let summary = summarize(&flagged, total_ingredients, risk_classification);

        info!(
            total = total_ingredients,
            flagged = flagged.len(),
            unknown = unknown_ingredients.len(),
            personalized = profile.is_some(),
            score,
            classification = %risk_classification,
            "scan scored"
        );

        AnalyzeResult {
            score,
            risk_classification,
            conflict_count: flagged.len(),
            flagged_ingredients: flagged,
            unknown_ingredients,
            summary,
            total_ingredients,
            audio_base64: None,
        }
    }

    /// Normalized, de-duplicated names in first-seen order.
    fn working_set(&self, raw: &[String]) -> Vec<String> {
        let mut seen = HashSet::with_capacity(raw.len());
        raw.iter()
            .filter_map(|r| self.kb.normalize(r))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

impl RiskScorer for ScoringEngine {
    fn score(&self, input: &ScanInput) -> AnalyzeResult {
        self.evaluate(input)
    }
}
