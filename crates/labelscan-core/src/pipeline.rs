//! The scan pipeline: one label photo in, one verified `AnalyzeResult` out.
//!
//! The pipeline enforces the request order of a scan:
//!
//!   Image → Vision → Profile → Score → Verify → Speech
//!
//! Scoring is only reached once the vision collaborator has produced at
//! least one ingredient string, and a result is only returned after the
//! verifier has passed it.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use labelscan_contracts::{
    error::{LabelscanError, LabelscanResult},
    profile::UserProfile,
    scan::{AnalyzeResult, ScanInput},
};

use crate::traits::{ProfileStore, ResultVerifier, RiskScorer, SpeechSynthesizer, VisionExtractor};

/// One `/analyze` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Raw image bytes as uploaded.
    pub image: Vec<u8>,

    /// MIME type reported by the client, e.g. `image/jpeg`.
    pub mime_type: String,

    /// Signed-in user, if any. Anonymous scans are not personalized.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Attach a spoken rendering of the summary.
    #[serde(default)]
    pub include_audio: bool,
}

impl ScanRequest {
    /// An anonymous request without audio.
    pub fn new(image: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            mime_type: mime_type.into(),
            user_id: None,
            include_audio: false,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_audio(mut self, include_audio: bool) -> Self {
        self.include_audio = include_audio;
        self
    }
}

/// Drives a scan through the collaborators.
///
/// The pipeline holds no per-request state, so one instance can serve any
/// number of concurrent scans.
pub struct ScanPipeline {
    vision: Box<dyn VisionExtractor>,
    profiles: Box<dyn ProfileStore>,
    speech: Box<dyn SpeechSynthesizer>,
    scorer: Box<dyn RiskScorer>,
    verifier: Box<dyn ResultVerifier>,
}

impl ScanPipeline {
    pub fn new(
        vision: Box<dyn VisionExtractor>,
        profiles: Box<dyn ProfileStore>,
        speech: Box<dyn SpeechSynthesizer>,
        scorer: Box<dyn RiskScorer>,
        verifier: Box<dyn ResultVerifier>,
    ) -> Self {
        Self {
            vision,
            profiles,
            speech,
            scorer,
            verifier,
        }
    }

    /// Run one scan.
    ///
    /// # Pipeline
    ///
    /// 1. Reject an empty image (`EmptyImage`)
    /// 2. `vision.extract()`; upstream failure → `VisionFailed`
    /// 3. Reject an empty extraction (`NoIngredients`)
    /// 4. Fetch the profile when a user id is given; a store failure is
    ///    logged and the scan continues unpersonalized
    /// 5. `scorer.score()`
    /// 6. `verifier.verify()`; a failing report → `VerificationFailed`
    /// 7. If requested, synthesize the summary and attach it as base64
    ///
    /// # Errors
    ///
    /// Every error maps to an HTTP status through
    /// `LabelscanError::status_code()`. Profile and speech failures are NOT
    /// errors.
    pub fn analyze(&self, request: ScanRequest) -> LabelscanResult<AnalyzeResult> {
        let scan_id = Uuid::new_v4();

        debug!(
            scan_id = %scan_id,
            mime_type = %request.mime_type,
            image_bytes = request.image.len(),
            signed_in = request.user_id.is_some(),
            include_audio = request.include_audio,
            "scan starting"
        );

        // ── Step 1: Image ────────────────────────────────────────────────────
        if request.image.is_empty() {
            warn!(scan_id = %scan_id, "rejected scan with empty image");
            return Err(LabelscanError::EmptyImage);
        }

        // ── Steps 2 & 3: Vision ──────────────────────────────────────────────
        let raw_ingredients = self
            .vision
            .extract(&request.image, &request.mime_type)
            .map_err(|e| {
                warn!(scan_id = %scan_id, error = %e, "ingredient extraction failed");
                match e {
                    LabelscanError::VisionFailed { .. } => e,
                    other => LabelscanError::VisionFailed {
                        reason: other.to_string(),
                    },
                }
            })?;

        if raw_ingredients.iter().all(|s| s.trim().is_empty()) {
            warn!(scan_id = %scan_id, "vision returned no ingredients");
            return Err(LabelscanError::NoIngredients);
        }

        debug!(
            scan_id = %scan_id,
            extracted = raw_ingredients.len(),
            "ingredients extracted"
        );

        // ── Step 4: Profile ──────────────────────────────────────────────────
        let profile = self.load_profile(scan_id, request.user_id.as_deref());

        // ── Step 5: Score ────────────────────────────────────────────────────
        let input = ScanInput {
            raw_ingredients,
            profile,
        };
        let mut result = self.scorer.score(&input);

        // ── Step 6: Verify ───────────────────────────────────────────────────
        let report = self.verifier.verify(&result)?;
        if !report.passed {
            let failure_summary = report.summary();
            warn!(
                scan_id = %scan_id,
                failures = %failure_summary,
                "result verification failed"
            );
            return Err(LabelscanError::VerificationFailed {
                reason: failure_summary,
            });
        }

        // ── Step 7: Speech ───────────────────────────────────────────────────
        if request.include_audio {
            result.audio_base64 = self.render_audio(scan_id, &result.summary);
        }

        info!(
            scan_id = %scan_id,
            score = result.display_score(),
            classification = %result.risk_classification,
            conflicts = result.conflict_count,
            unknown = result.unknown_ingredients.len(),
            "scan complete"
        );

        Ok(result)
    }

    fn load_profile(&self, scan_id: Uuid, user_id: Option<&str>) -> Option<UserProfile> {
        let user_id = user_id.map(str::trim).filter(|id| !id.is_empty())?;

        match self.profiles.get_profile(user_id) {
            Ok(Some(profile)) => {
                debug!(scan_id = %scan_id, user_id = %user_id, "profile loaded");
                Some(profile)
            }
            Ok(None) => {
                debug!(scan_id = %scan_id, user_id = %user_id, "no saved profile, scanning unpersonalized");
                None
            }
            Err(e) => {
                warn!(
                    scan_id = %scan_id,
                    user_id = %user_id,
                    error = %e,
                    "profile lookup failed, scanning unpersonalized"
                );
                None
            }
        }
    }

    fn render_audio(&self, scan_id: Uuid, summary: &str) -> Option<String> {
        match self.speech.synthesize(summary) {
            Some(bytes) if !bytes.is_empty() => Some(STANDARD.encode(bytes)),
            _ => {
                warn!(scan_id = %scan_id, "speech synthesis unavailable, returning result without audio");
                None
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
