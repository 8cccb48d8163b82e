//! # labelscan-core
//!
//! The trait seams of the labelscan runtime and the pipeline that drives a
//! single label scan through them.
//!
//! This crate provides:
//! - The five collaborator traits (`VisionExtractor`, `ProfileStore`,
//!   `SpeechSynthesizer`, `RiskScorer`, `ResultVerifier`)
//! - The `ScanPipeline` that wires them together in request order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use labelscan_core::{ScanPipeline, ScanRequest};
//!
//! let pipeline = ScanPipeline::new(vision, profiles, speech, scorer, verifier);
//! let result = pipeline.analyze(ScanRequest::new(image_bytes, "image/jpeg"))?;
//! ```

pub mod pipeline;
pub mod traits;

pub use pipeline::{ScanPipeline, ScanRequest};
