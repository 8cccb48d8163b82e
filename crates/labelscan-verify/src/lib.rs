//! # labelscan-verify
//!
//! Contract verification for labelscan results.
//!
//! This crate provides [`engine::ContractVerifier`], which implements the
//! [`labelscan_core::traits::ResultVerifier`] trait. It checks every
//! `AnalyzeResult` in two phases:
//!
//! 1. **Structural** — the serialized result is validated against the wire
//!    schema in [`schema`] via the `jsonschema` crate.
//! 2. **Semantic** — invariants the schema cannot express (score/class
//!    agreement, ordering, uniqueness), plus any checks registered by the
//!    host.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use labelscan_verify::engine::ContractVerifier;
//!
//! let mut verifier = ContractVerifier::new();
//! verifier.register_check("summary-mentions-class", Box::new(|result| {
//!     if result.summary.contains(result.risk_classification.label()) {
//!         None
//!     } else {
//!         Some("summary does not state the classification".to_string())
//!     }
//! }));
//! ```

pub mod engine;
pub mod schema;

pub use engine::ContractVerifier;
