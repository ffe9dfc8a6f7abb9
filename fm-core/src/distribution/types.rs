use chrono::{DateTime, Utc};
use fm_common::Genre;
use tokio::sync::oneshot;

/// A single track as handed to distribution
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSubmission {
    pub song_title: String,
    pub isrc: String,
    pub audio_ref: Option<String>,
    pub credits: String,
}

/// Everything the distribution team receives for one release
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRequest {
    pub submission_id: String,
    pub artist_id: String,
    pub artist_name: String,
    pub title: String,
    pub genre: Genre,
    pub release_date: String,
    /// Empty when the catalog should generate one
    pub upc: String,
    pub cover_art: Option<String>,
    /// In display order
    pub tracks: Vec<TrackSubmission>,
}

/// Proof that a submission reached the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub release_id: String,
    pub title: String,
    pub upc: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn confirmation_message(&self) -> String {
        format!(
            "Your release \"{}\" has been sent to our distribution team. \
             We'll notify you via email once it's approved and distributed to stores.",
            self.title
        )
    }
}

pub(crate) struct DistributionCommand {
    pub request: DistributionRequest,
    pub reply_tx: oneshot::Sender<SubmissionReceipt>,
}
