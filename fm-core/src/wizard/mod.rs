//! Release submission wizard
//!
//! Four linear steps (metadata, cover art, tracks, review) over one
//! [`ReleaseDraft`], followed by a submission lifecycle
//! Idle -> Submitting -> Finished. Data entered on any step survives
//! navigation in both directions. Once a submission is in flight the wizard
//! is frozen: edits and navigation become no-ops.

mod draft;
mod error;
mod review;
mod step;
mod submission;

pub use draft::{MetadataField, ReleaseDraft, TrackDraft, TrackField};
pub use error::{WizardAction, WizardError};
pub use review::{CoverPreview, ReleaseReview, ReviewTrack};
pub use step::{progress, StepIndicator, StepStatus, WizardStep};
pub use submission::{SubmissionPhase, SubmitOutcome};

use crate::assets::AssetPicker;
use crate::distribution::{DistributionHandle, PendingState, SubmissionReceipt};
use crate::routes::Route;
use crate::session::User;
use fm_common::{Genre, TrackId};
use submission::Lifecycle;
use tracing::{debug, info};

/// Events that can be dispatched to the wizard
#[derive(Clone, Debug)]
pub enum WizardEvent {
    Advance,
    Retreat,
    SetField { field: MetadataField, value: String },
    SetGenre(Genre),
    SetCoverArt(String),
    ClearCoverArt,
    AddTrack,
    RemoveTrack(TrackId),
    UpdateTrack {
        id: TrackId,
        field: TrackField,
        value: String,
    },
}

pub struct ReleaseWizard {
    user: User,
    distribution: DistributionHandle,
    step: WizardStep,
    draft: ReleaseDraft,
    lifecycle: Lifecycle,
}

impl ReleaseWizard {
    /// Start a wizard for the logged-in `user`.
    pub fn new(user: User, distribution: DistributionHandle) -> Self {
        debug!("Release wizard opened for {}", user.stage_name);
        Self {
            user,
            distribution,
            step: WizardStep::default(),
            draft: ReleaseDraft::default(),
            lifecycle: Lifecycle::Idle,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ReleaseDraft {
        &self.draft
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.lifecycle.phase()
    }

    pub fn progress(&self) -> Vec<StepIndicator> {
        progress(self.step)
    }

    pub fn review(&self) -> ReleaseReview {
        ReleaseReview::new(&self.draft, &self.user)
    }

    /// Edits and navigation are only accepted before submission.
    pub fn is_editable(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Idle)
    }

    fn frozen(&self, what: &str) -> bool {
        if self.is_editable() {
            return false;
        }
        debug!("Ignoring {} while {:?}", what, self.phase());
        true
    }

    /// Apply an event. This is the single entry point for user input.
    pub fn apply(&mut self, event: WizardEvent) -> Result<(), WizardError> {
        match event {
            WizardEvent::Advance => self.advance(),
            WizardEvent::Retreat => self.retreat(),
            WizardEvent::SetField { field, value } => self.set_field(field, value),
            WizardEvent::SetGenre(genre) => {
                self.set_genre(genre);
                Ok(())
            }
            WizardEvent::SetCoverArt(reference) => {
                self.set_cover_art(reference);
                Ok(())
            }
            WizardEvent::ClearCoverArt => {
                self.clear_cover_art();
                Ok(())
            }
            WizardEvent::AddTrack => {
                self.add_track();
                Ok(())
            }
            WizardEvent::RemoveTrack(id) => self.remove_track(id),
            WizardEvent::UpdateTrack { id, field, value } => {
                self.update_track(id, field, value);
                Ok(())
            }
        }
    }

    // --- Step controller ---

    pub fn advance(&mut self) -> Result<(), WizardError> {
        if self.frozen("advance") {
            return Ok(());
        }
        let next = self.step.next().ok_or(WizardError::InvalidTransition {
            action: WizardAction::Advance,
            step: self.step,
        })?;
        debug!("Wizard step {} -> {}", self.step.label(), next.label());
        self.step = next;
        Ok(())
    }

    pub fn retreat(&mut self) -> Result<(), WizardError> {
        if self.frozen("retreat") {
            return Ok(());
        }
        let prev = self.step.prev().ok_or(WizardError::InvalidTransition {
            action: WizardAction::Retreat,
            step: self.step,
        })?;
        debug!("Wizard step {} -> {}", self.step.label(), prev.label());
        self.step = prev;
        Ok(())
    }

    // --- Metadata and cover art ---

    pub fn set_field(&mut self, field: MetadataField, value: String) -> Result<(), WizardError> {
        if self.frozen("metadata edit") {
            return Ok(());
        }
        self.draft.set_field(field, value)
    }

    pub fn set_genre(&mut self, genre: Genre) {
        if !self.frozen("genre edit") {
            self.draft.set_genre(genre);
        }
    }

    pub fn set_cover_art(&mut self, reference: String) {
        if !self.frozen("cover art") {
            self.draft.set_cover_art(reference);
        }
    }

    pub fn clear_cover_art(&mut self) {
        if !self.frozen("cover art") {
            self.draft.clear_cover_art();
        }
    }

    /// Ask the picker for cover art. Returns false if nothing was stored.
    pub async fn pick_cover_art(&mut self, picker: &dyn AssetPicker) -> bool {
        if self.frozen("cover art") {
            return false;
        }
        match picker.pick_cover_art().await {
            Some(reference) => {
                self.set_cover_art(reference);
                self.draft.cover_art().is_some()
            }
            None => false,
        }
    }

    // --- Track collection ---

    /// Append an empty track. None while frozen.
    pub fn add_track(&mut self) -> Option<TrackId> {
        if self.frozen("add track") {
            return None;
        }
        Some(self.draft.add_track())
    }

    pub fn remove_track(&mut self, id: TrackId) -> Result<(), WizardError> {
        if self.frozen("remove track") {
            return Ok(());
        }
        self.draft.remove_track(id)
    }

    /// Returns false when frozen or when `id` is unknown.
    pub fn update_track(&mut self, id: TrackId, field: TrackField, value: String) -> bool {
        if self.frozen("track edit") {
            return false;
        }
        self.draft.update_track(id, field, value)
    }

    pub async fn pick_track_audio(&mut self, id: TrackId, picker: &dyn AssetPicker) -> bool {
        if self.frozen("audio selection") || !self.draft.tracks().contains(id) {
            return false;
        }
        match picker.pick_audio(id).await {
            Some(reference) => self.update_track(id, TrackField::AudioRef, reference),
            None => false,
        }
    }

    // --- Submission lifecycle ---

    /// Send the draft to distribution. Only legal from the review step.
    ///
    /// Repeated calls while the request is in flight are no-ops.
    pub fn submit(&mut self) -> Result<SubmitOutcome, WizardError> {
        match self.lifecycle {
            Lifecycle::Submitting(_) => {
                debug!("Submit ignored, request already in flight");
                return Ok(SubmitOutcome::AlreadySubmitting);
            }
            Lifecycle::Finished(_) => return Ok(SubmitOutcome::AlreadyFinished),
            Lifecycle::Idle => {}
        }
        if !self.step.is_last() {
            return Err(WizardError::InvalidTransition {
                action: WizardAction::Submit,
                step: self.step,
            });
        }

        let submission_id = uuid::Uuid::new_v4().to_string();
        let request = self.draft.to_request(&self.user, submission_id.clone());
        let pending = self.distribution.submit(request);
        info!(
            "Submitting \"{}\" for {} as {}",
            self.draft.title(),
            self.user.stage_name,
            submission_id
        );
        self.lifecycle = Lifecycle::Submitting(pending);
        Ok(SubmitOutcome::Started { submission_id })
    }

    /// Wait for the in-flight submission and enter the finished state.
    ///
    /// Resolves at most once; later calls return the stored receipt.
    /// Dropping the returned future does not cancel the submission.
    pub async fn finish(&mut self) -> Result<&SubmissionReceipt, WizardError> {
        let resolved = match &mut self.lifecycle {
            Lifecycle::Submitting(pending) => Some(pending.receipt().await),
            Lifecycle::Idle => {
                return Err(WizardError::InvalidTransition {
                    action: WizardAction::Finish,
                    step: self.step,
                })
            }
            Lifecycle::Finished(_) => None,
        };
        match resolved {
            Some(Some(receipt)) => self.resolve(receipt),
            Some(None) => return Err(WizardError::DistributionUnavailable),
            None => {}
        }
        match &self.lifecycle {
            Lifecycle::Finished(receipt) => Ok(receipt),
            _ => Err(WizardError::DistributionUnavailable),
        }
    }

    /// Non-blocking variant of [`finish`](Self::finish) for event loops.
    pub fn poll_submission(&mut self) -> Result<SubmissionPhase, WizardError> {
        let state = match &mut self.lifecycle {
            Lifecycle::Submitting(pending) => pending.check(),
            _ => return Ok(self.phase()),
        };
        match state {
            PendingState::Waiting => {}
            PendingState::Done(receipt) => self.resolve(receipt),
            PendingState::WorkerGone => return Err(WizardError::DistributionUnavailable),
        }
        Ok(self.phase())
    }

    fn resolve(&mut self, receipt: SubmissionReceipt) {
        info!(
            "Release \"{}\" submitted as {}",
            receipt.title, receipt.release_id
        );
        self.lifecycle = Lifecycle::Finished(receipt);
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match &self.lifecycle {
            Lifecycle::Finished(receipt) => Some(receipt),
            _ => None,
        }
    }

    pub fn confirmation_message(&self) -> Option<String> {
        self.receipt().map(SubmissionReceipt::confirmation_message)
    }

    /// Where to send the user after submission ("Go to Dashboard").
    pub fn exit_route(&self) -> Option<Route> {
        self.receipt().map(|_| Route::Dashboard)
    }
}
