//! Trait definitions for the labelscan scan pipeline.
//!
//! - `VisionExtractor`   — external: photo → raw ingredient strings
//! - `ProfileStore`      — external: user id → saved profile
//! - `SpeechSynthesizer` — external: summary text → audio bytes
//! - `RiskScorer`        — the deterministic scoring engine
//! - `ResultVerifier`    — contract checker run before a result leaves
//!
//! The three external collaborators are the only places a scan can touch
//! I/O. The scorer and verifier are pure.

use labelscan_contracts::{
    error::LabelscanResult,
    profile::UserProfile,
    scan::{AnalyzeResult, ScanInput},
    verify::VerificationReport,
};

/// Reads the ingredient list off a label photo.
///
/// Implementations are usually backed by a hosted vision model. The strings
/// returned are untrusted free text: OCR noise, duplicates, and stray
/// punctuation are expected and are cleaned up by the normalizer.
pub trait VisionExtractor: Send + Sync {
    /// Extract ingredient strings from `image`, in label order.
    ///
    /// Return `Err(LabelscanError::VisionFailed)` when the upstream call
    /// fails. An empty `Vec` is a valid answer ("no label found"); the
    /// pipeline turns it into `NoIngredients`.
    fn extract(&self, image: &[u8], mime_type: &str) -> LabelscanResult<Vec<String>>;
}

/// Looks up a saved user profile.
pub trait ProfileStore: Send + Sync {
    /// `Ok(None)` means the user has no saved profile. `Err` means the store
    /// could not be reached; the pipeline degrades to an anonymous scan.
    fn get_profile(&self, user_id: &str) -> LabelscanResult<Option<UserProfile>>;
}

/// Renders summary text as speech.
pub trait SpeechSynthesizer: Send + Sync {
    /// Return encoded audio, or `None` if synthesis is unavailable or failed.
    /// Speech is best-effort and never fails a scan.
    fn synthesize(&self, text: &str) -> Option<Vec<u8>>;
}

/// The scoring engine.
///
/// Implementations must be deterministic: the same `ScanInput` against the
/// same reference data always yields the same `AnalyzeResult`. Scoring never
/// fails; unknown or malformed ingredients are reported inside the result.
pub trait RiskScorer: Send + Sync {
    fn score(&self, input: &ScanInput) -> AnalyzeResult;
}

/// The last gate before a result is delivered.
///
/// Implementations inspect the finished `AnalyzeResult` and report every
/// contract violation they find. A failing report stops the scan.
pub trait ResultVerifier: Send + Sync {
    fn verify(&self, result: &AnalyzeResult) -> LabelscanResult<VerificationReport>;
}
