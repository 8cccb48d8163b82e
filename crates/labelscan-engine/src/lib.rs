//! # labelscan-engine
//!
//! Deterministic ingredient risk scoring.
//!
//! Given the raw ingredient strings read off a label and an optional user
//! profile, [`ScoringEngine`] produces a 0–100 safety score, a three-tier
//! classification, per-ingredient conflict explanations, the unknown
//! ingredients, and a one-line summary.
//!
//! ## Stages
//!
//! - [`matcher`]   — per-ingredient rule evaluation
//! - [`aggregate`] — severity folding and classification
//! - [`summary`]   — human-readable sentence
//!
//! The engine is a pure function of its input and the knowledge base: no
//! I/O, no locks, no state between calls.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use labelscan_engine::ScoringEngine;
//! use labelscan_knowledge::KnowledgeBase;
//!
//! let engine = ScoringEngine::new(Arc::new(KnowledgeBase::bundled()?));
//! let result = engine.evaluate(&ScanInput::new(["Peanut Oil", "Sugar", "Salt"], Some(profile)));
//! ```

pub mod aggregate;
pub mod engine;
pub mod matcher;
pub mod summary;

pub use engine::ScoringEngine;

// ── Tests ─────────────────────────────────────────────────────────────────────
