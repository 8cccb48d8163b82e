//! Error types for the labelscan workspace.
//!
//! The scoring engine itself never fails on request-shaped data. Errors exist
//! for two places only: process startup (the knowledge base could not be
//! loaded) and the scan pipeline's collaborator calls. Each variant knows the
//! HTTP status an orchestrating service should answer with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The unified error type for labelscan.
#[derive(Debug, Error)]
pub enum LabelscanError {
    /// The knowledge base could not be read, parsed, or validated.
    ///
    /// This is a startup failure: the engine cannot operate without its
    /// reference data.
    #[error("knowledge base error: {reason}")]
    KnowledgeBase { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The uploaded image carried no bytes.
    #[error("image is empty")]
    EmptyImage,

    /// The vision collaborator failed to extract ingredients.
    #[error("ingredient extraction failed: {reason}")]
    VisionFailed { reason: String },

    /// Extraction succeeded but returned nothing usable.
    #[error("no ingredients could be extracted from the image; ensure it shows a food label")]
    NoIngredients,

    /// The verifier rejected a result before it could be delivered.
    #[error("result verification failed: {reason}")]
    VerificationFailed { reason: String },
}

impl LabelscanError {
    /// HTTP status code an orchestrating service should return for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            LabelscanError::EmptyImage => 400,
            LabelscanError::NoIngredients => 422,
            LabelscanError::VisionFailed { .. } => 502,
            LabelscanError::KnowledgeBase { .. }
            | LabelscanError::ConfigError { .. }
            | LabelscanError::VerificationFailed { .. } => 500,
        }
    }

    /// The structured `{ "detail": ... }` error body.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            detail: self.to_string(),
        }
    }
}

/// Wire shape of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Convenience alias used throughout the labelscan crates.
pub type LabelscanResult<T> = Result<T, LabelscanError>;
