use crate::distribution::{PendingSubmission, SubmissionReceipt};

/// Where the wizard is in sending the release off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    /// Request in flight, controls disabled
    Submitting,
    /// Terminal, only the confirmation is shown
    Finished,
}

/// Result of a submit request that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started { submission_id: String },
    /// A request is already in flight; nothing was sent
    AlreadySubmitting,
    AlreadyFinished,
}

pub(crate) enum Lifecycle {
    Idle,
    Submitting(PendingSubmission),
    Finished(SubmissionReceipt),
}

impl Lifecycle {
    pub(crate) fn phase(&self) -> SubmissionPhase {
        match self {
            Lifecycle::Idle => SubmissionPhase::Idle,
            Lifecycle::Submitting(_) => SubmissionPhase::Submitting,
            Lifecycle::Finished(_) => SubmissionPhase::Finished,
        }
    }
}
