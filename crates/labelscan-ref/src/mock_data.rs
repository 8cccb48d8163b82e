//! Stand-in collaborators for the labelscan reference runtime.
//!
//! Nothing here contacts an external system. The vision stub reads label
//! text straight out of the "image" bytes, the profile store is a fixed
//! in-memory map, and the speech stub returns a deterministic byte string.

use std::collections::HashMap;

use tracing::debug;

use labelscan_contracts::{
    error::{LabelscanError, LabelscanResult},
    profile::UserProfile,
};
use labelscan_core::traits::{ProfileStore, SpeechSynthesizer, VisionExtractor};

// ── Labels (mock) ─────────────────────────────────────────────────────────────

/// Honey-roasted snack mix fried in peanut oil.
pub const SNACK_MIX_LABEL: &str = "INGREDIENTS: Peanut Oil, Sugar, Salt.";

/// Sandwich bread.
pub const BREAD_LABEL: &str = "Ingredients: Enriched Wheat Flour, Sugar, Whey, Palm Oil, Salt, \
                               Natural Flavor, Soy Lecithin.";

/// Cherry soda.
pub const SODA_LABEL: &str = "Ingredients: Water; High Fructose Corn Syrup; Citric Acid; \
                              Sodium Benzoate (Preservative); Red 40; Caffeine";

// ── Users (mock) ──────────────────────────────────────────────────────────────

/// Peanut allergy, no other constraints.
pub const PEANUT_ALLERGY_USER: &str = "user-maya";

/// Vegan, diabetic, hypertensive, trying to lose weight.
pub const VEGAN_DIABETIC_USER: &str = "user-sam";

/// Signed in but never saved a profile.
pub const NEW_USER: &str = "user-new";

// ── Vision (mock) ─────────────────────────────────────────────────────────────

/// A vision stub whose "images" are UTF-8 label text.
///
/// Drops a leading `Ingredients:` heading, then splits on commas, semicolons,
/// parentheses, brackets, and line breaks, the way a vision model flattens
/// sub-ingredient lists. Non-UTF-8 bytes are treated as an upstream failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLabelVision;

impl VisionExtractor for TextLabelVision {
    fn extract(&self, image: &[u8], mime_type: &str) -> LabelscanResult<Vec<String>> {
        let text = std::str::from_utf8(image).map_err(|e| LabelscanError::VisionFailed {
            reason: format!("could not read label text from {} upload: {}", mime_type, e),
        })?;

        let items = split_label(text);
        debug!(mime_type = %mime_type, extracted = items.len(), "label text parsed");
        Ok(items)
    }
}

fn split_label(text: &str) -> Vec<String> {
    let body = strip_heading(text.trim());
    body.split(|c: char| matches!(c, ',' | ';' | '(' | ')' | '[' | ']' | '\n' | '\r'))
        .map(|part| part.trim().trim_end_matches('.').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_heading(text: &str) -> &str {
    const HEADING: &str = "ingredients:";
    match text.get(..HEADING.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(HEADING) => &text[HEADING.len()..],
        _ => text,
    }
}

// ── Profiles (mock) ───────────────────────────────────────────────────────────

/// A read-only, in-memory profile store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: HashMap<String, UserProfile>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, user_id: impl Into<String>, profile: UserProfile) -> Self {
        self.profiles.insert(user_id.into(), profile);
        self
    }

    /// The store used by every scenario.
    pub fn demo() -> Self {
        Self::new()
            .with_profile(
                PEANUT_ALLERGY_USER,
                UserProfile::new().with_allergies(["Peanuts"]),
            )
            .with_profile(
                VEGAN_DIABETIC_USER,
                UserProfile::new()
                    .with_dietary_restrictions(["Vegan"])
                    .with_health_conditions(["Diabetes", "Hypertension"])
                    .with_health_goals(["Weight Loss"]),
            )
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get_profile(&self, user_id: &str) -> LabelscanResult<Option<UserProfile>> {
        Ok(self.profiles.get(user_id).cloned())
    }
}

// ── Speech (mock) ─────────────────────────────────────────────────────────────

/// Header of every clip produced by [`TranscriptSpeech`].
pub const SPEECH_HEADER: &[u8] = b"LSPCM1";

/// A speech stub that "renders" text as a header followed by the UTF-8
/// transcript. Same text, same bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptSpeech;

impl SpeechSynthesizer for TranscriptSpeech {
    fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        if text.trim().is_empty() {
            return None;
        }
        let mut clip = Vec::with_capacity(SPEECH_HEADER.len() + text.len());
        clip.extend_from_slice(SPEECH_HEADER);
        clip.extend_from_slice(text.as_bytes());
        Some(clip)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
