//! In-progress release
//!
//! Field writes are not validated, except that the genre has to be one of the
//! fixed set. The track list never drops below one entry.

use crate::distribution::{DistributionRequest, TrackSubmission};
use crate::session::User;
use crate::wizard::WizardError;
use fm_common::{Genre, RemoveError, TrackId, TrackList};
use tracing::debug;

/// Release-level field addressed by [`ReleaseDraft::set_field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Title,
    Genre,
    /// ISO date, empty = unset
    ReleaseDate,
    /// Empty = generated on submission
    Upc,
}

/// Per-track field addressed by [`ReleaseDraft::update_track`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    SongTitle,
    Isrc,
    /// Empty value clears the reference
    AudioRef,
    Credits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDraft {
    pub song_title: String,
    pub isrc: String,
    pub audio_ref: Option<String>,
    pub credits: String,
}

impl TrackDraft {
    fn set(&mut self, field: TrackField, value: String) {
        match field {
            TrackField::SongTitle => self.song_title = value,
            TrackField::Isrc => self.isrc = value,
            TrackField::AudioRef => {
                self.audio_ref = if value.is_empty() { None } else { Some(value) }
            }
            TrackField::Credits => self.credits = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDraft {
    title: String,
    genre: Genre,
    release_date: String,
    upc: String,
    cover_art: Option<String>,
    tracks: TrackList<TrackDraft>,
}

impl Default for ReleaseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            genre: Genre::default(),
            release_date: String::new(),
            upc: String::new(),
            cover_art: None,
            tracks: TrackList::new(TrackDraft::default()),
        }
    }
}

impl ReleaseDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    pub fn upc(&self) -> &str {
        &self.upc
    }

    pub fn cover_art(&self) -> Option<&str> {
        self.cover_art.as_deref()
    }

    pub fn tracks(&self) -> &TrackList<TrackDraft> {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&TrackDraft> {
        self.tracks.get(id)
    }

    /// Write one release-level field. Only the genre can be rejected.
    pub fn set_field(&mut self, field: MetadataField, value: String) -> Result<(), WizardError> {
        match field {
            MetadataField::Title => self.title = value,
            MetadataField::Genre => {
                self.genre = value
                    .parse()
                    .map_err(|_| WizardError::UnknownGenre(value))?;
            }
            MetadataField::ReleaseDate => self.release_date = value,
            MetadataField::Upc => self.upc = value,
        }
        Ok(())
    }

    pub fn set_genre(&mut self, genre: Genre) {
        self.genre = genre;
    }

    pub fn set_cover_art(&mut self, reference: String) {
        self.cover_art = Some(reference);
    }

    pub fn clear_cover_art(&mut self) {
        self.cover_art = None;
    }

    pub fn add_track(&mut self) -> TrackId {
        self.tracks.push(TrackDraft::default())
    }

    /// Remove a track. Unknown ids are ignored.
    pub fn remove_track(&mut self, id: TrackId) -> Result<(), WizardError> {
        match self.tracks.remove(id) {
            Ok(_) => Ok(()),
            Err(RemoveError::LastTrack) => Err(WizardError::MinimumTracksViolation),
            Err(RemoveError::NotFound(id)) => {
                debug!("Ignoring removal of unknown {}", id);
                Ok(())
            }
        }
    }

    /// Update one field of one track. Returns false for an unknown id.
    pub fn update_track(&mut self, id: TrackId, field: TrackField, value: String) -> bool {
        match self.tracks.get_mut(id) {
            Some(track) => {
                track.set(field, value);
                true
            }
            None => {
                debug!("Ignoring update of unknown {}", id);
                false
            }
        }
    }

    pub(crate) fn to_request(&self, user: &User, submission_id: String) -> DistributionRequest {
        DistributionRequest {
            submission_id,
            artist_id: user.id.clone(),
            artist_name: user.stage_name.clone(),
            title: self.title.clone(),
            genre: self.genre,
            release_date: self.release_date.clone(),
            upc: self.upc.clone(),
            cover_art: self.cover_art.clone(),
            tracks: self
                .tracks
                .iter()
                .map(|(_, t)| TrackSubmission {
                    song_title: t.song_title.clone(),
                    isrc: t.isrc.clone(),
                    audio_ref: t.audio_ref.clone(),
                    credits: t.credits.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft() {
        let draft = ReleaseDraft::default();
        assert_eq!(draft.genre(), Genre::Pop);
        assert_eq!(draft.tracks().len(), 1);
        assert!(draft.cover_art().is_none());
        assert_eq!(draft.release_date(), "");
    }

    #[test]
    fn test_set_genre_by_name() {
        let mut draft = ReleaseDraft::default();
        draft
            .set_field(MetadataField::Genre, "Lofi".to_string())
            .unwrap();
        assert_eq!(draft.genre(), Genre::Lofi);
    }

    #[test]
    fn test_unknown_genre_leaves_draft_unchanged() {
        let mut draft = ReleaseDraft::default();
        draft.set_genre(Genre::Rock);
        let before = draft.clone();

        let err = draft
            .set_field(MetadataField::Genre, "Vaporwave".to_string())
            .unwrap_err();
        assert_eq!(err, WizardError::UnknownGenre("Vaporwave".to_string()));
        assert_eq!(draft, before);
    }

    #[test]
    fn test_empty_values_are_accepted() {
        let mut draft = ReleaseDraft::default();
        draft
            .set_field(MetadataField::ReleaseDate, "2024-01-01".to_string())
            .unwrap();
        draft
            .set_field(MetadataField::ReleaseDate, String::new())
            .unwrap();
        draft.set_field(MetadataField::Upc, String::new()).unwrap();
        assert_eq!(draft.release_date(), "");
        assert_eq!(draft.upc(), "");
    }

    #[test]
    fn test_cover_art_slot_holds_one_reference() {
        let mut draft = ReleaseDraft::default();
        draft.set_cover_art("a.png".to_string());
        draft.set_cover_art("b.png".to_string());
        assert_eq!(draft.cover_art(), Some("b.png"));
        draft.clear_cover_art();
        assert!(draft.cover_art().is_none());
    }

    #[test]
    fn test_audio_ref_cleared_by_empty_value() {
        let mut draft = ReleaseDraft::default();
        let id = draft.tracks().first_id();
        assert!(draft.update_track(id, TrackField::AudioRef, "song.wav".to_string()));
        assert_eq!(draft.track(id).unwrap().audio_ref.as_deref(), Some("song.wav"));
        draft.update_track(id, TrackField::AudioRef, String::new());
        assert!(draft.track(id).unwrap().audio_ref.is_none());
    }

    #[test]
    fn test_remove_only_track_fails() {
        let mut draft = ReleaseDraft::default();
        let id = draft.tracks().first_id();
        assert_eq!(
            draft.remove_track(id),
            Err(WizardError::MinimumTracksViolation)
        );
        assert_eq!(draft.tracks().len(), 1);
    }

    #[test]
    fn test_update_unknown_track_is_ignored() {
        let mut draft = ReleaseDraft::default();
        let extra = draft.add_track();
        draft.remove_track(extra).unwrap();
        let before = draft.clone();
        assert!(!draft.update_track(extra, TrackField::SongTitle, "Ghost".to_string()));
        assert_eq!(draft, before);
    }

    #[test]
    fn test_to_request_keeps_track_order() {
        let mut draft = ReleaseDraft::default();
        let first = draft.tracks().first_id();
        let second = draft.add_track();
        draft.update_track(second, TrackField::SongTitle, "Second".to_string());
        draft.update_track(first, TrackField::SongTitle, "First".to_string());

        let user = User {
            id: "u1".to_string(),
            name: "Elena".to_string(),
            email: "elena@example.com".to_string(),
            stage_name: "Elena Ray".to_string(),
            role: crate::session::UserRole::Artist,
        };
        let request = draft.to_request(&user, "sub-9".to_string());
        let titles: Vec<&str> = request
            .tracks
            .iter()
            .map(|t| t.song_title.as_str())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(request.artist_name, "Elena Ray");
        assert_eq!(request.submission_id, "sub-9");
    }
}
