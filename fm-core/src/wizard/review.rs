use crate::session::User;
use crate::wizard::ReleaseDraft;
use fm_common::{Genre, TrackId};
use std::fmt;

const DATE_PLACEHOLDER: &str = "Not set";
const UPC_PLACEHOLDER: &str = "Auto-generated";
const TITLE_PLACEHOLDER: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverPreview {
    Image(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTrack {
    pub id: TrackId,
    /// 1-based position
    pub number: usize,
    pub title: String,
    pub isrc: Option<String>,
    pub has_audio: bool,
}

/// Read-only view of a draft as shown on the review step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReview {
    pub title: String,
    pub artist_name: String,
    pub genre: Genre,
    pub release_date: String,
    pub upc: String,
    pub cover: CoverPreview,
    pub total_tracks: usize,
    pub tracks: Vec<ReviewTrack>,
}

impl ReleaseReview {
    pub fn new(draft: &ReleaseDraft, user: &User) -> Self {
        let or_placeholder = |value: &str, placeholder: &str| {
            if value.trim().is_empty() {
                placeholder.to_string()
            } else {
                value.to_string()
            }
        };
        let tracks: Vec<ReviewTrack> = draft
            .tracks()
            .iter()
            .enumerate()
            .map(|(idx, (id, track))| ReviewTrack {
                id,
                number: idx + 1,
                title: or_placeholder(&track.song_title, TITLE_PLACEHOLDER),
                isrc: Some(track.isrc.trim().to_string()).filter(|s| !s.is_empty()),
                has_audio: track.audio_ref.is_some(),
            })
            .collect();
        Self {
            title: draft.title().to_string(),
            artist_name: user.stage_name.clone(),
            genre: draft.genre(),
            release_date: or_placeholder(draft.release_date(), DATE_PLACEHOLDER),
            upc: or_placeholder(draft.upc(), UPC_PLACEHOLDER),
            cover: match draft.cover_art() {
                Some(reference) => CoverPreview::Image(reference.to_string()),
                None => CoverPreview::Placeholder,
            },
            total_tracks: tracks.len(),
            tracks,
        }
    }

    /// "Artist • Genre"
    pub fn byline(&self) -> String {
        format!("{} • {}", self.artist_name, self.genre)
    }
}

impl fmt::Display for ReleaseReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.byline())?;
        match &self.cover {
            CoverPreview::Image(reference) => writeln!(f, "Cover Art: {reference}")?,
            CoverPreview::Placeholder => writeln!(f, "Cover Art: (none selected)")?,
        }
        writeln!(f, "Release Date: {}", self.release_date)?;
        writeln!(f, "UPC: {}", self.upc)?;
        writeln!(f, "Total Tracks: {}", self.total_tracks)?;
        for track in &self.tracks {
            let audio = if track.has_audio {
                "Audio Uploaded"
            } else {
                "No Audio"
            };
            write!(f, "  {}. {} [{}]", track.number, track.title, audio)?;
            if let Some(isrc) = &track.isrc {
                write!(f, " ISRC {isrc}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
