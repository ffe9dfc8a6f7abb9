//! Asset selection
//!
//! Cover art and audio files are chosen through an external picker. The
//! wizard stores whatever reference comes back and never inspects content.

use async_trait::async_trait;
use fm_common::TrackId;

/// Advisory copy shown next to the cover art slot. Not enforced.
pub const COVER_ART_GUIDELINES: [&str; 2] = [
    "Recommended: 3000x3000px, JPEG/PNG",
    "Must not contain URLs, social handles, or store logos",
];

/// Advisory copy shown next to each audio slot. Not enforced.
pub const AUDIO_GUIDELINES: &str = "Audio File (.wav or .mp3, min 320kbps)";

#[async_trait]
pub trait AssetPicker: Send + Sync {
    /// Returns None when the user dismisses the picker.
    async fn pick_cover_art(&self) -> Option<String>;

    async fn pick_audio(&self, track: TrackId) -> Option<String>;
}

/// Picker that answers immediately with fixed references.
#[derive(Debug, Clone)]
pub struct MockAssetPicker {
    pub cover_art: Option<String>,
}

impl Default for MockAssetPicker {
    fn default() -> Self {
        Self {
            cover_art: Some("https://picsum.photos/seed/newrelease/800/800".to_string()),
        }
    }
}

#[async_trait]
impl AssetPicker for MockAssetPicker {
    async fn pick_cover_art(&self) -> Option<String> {
        self.cover_art.clone()
    }

    async fn pick_audio(&self, track: TrackId) -> Option<String> {
        Some(format!("{track}.wav"))
    }
}
