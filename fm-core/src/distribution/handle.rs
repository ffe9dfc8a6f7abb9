use crate::distribution::types::{DistributionCommand, DistributionRequest, SubmissionReceipt};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

/// Handle for sending releases to the distribution worker
#[derive(Clone)]
pub struct DistributionHandle {
    commands_tx: mpsc::UnboundedSender<DistributionCommand>,
}

impl DistributionHandle {
    pub(crate) fn new(commands_tx: mpsc::UnboundedSender<DistributionCommand>) -> Self {
        Self { commands_tx }
    }

    /// Queue a release for distribution.
    ///
    /// The request is owned by the worker from here on: dropping the returned
    /// `PendingSubmission` does not cancel it.
    pub fn submit(&self, request: DistributionRequest) -> PendingSubmission {
        let (reply_tx, reply_rx) = oneshot::channel();
        let submission_id = request.submission_id.clone();
        info!(
            "Queueing submission {} \"{}\" ({} tracks)",
            submission_id,
            request.title,
            request.tracks.len()
        );
        if self
            .commands_tx
            .send(DistributionCommand { request, reply_tx })
            .is_err()
        {
            // The command, and with it reply_tx, is dropped here; the pending
            // submission reports the worker as gone.
            warn!("Distribution worker is not running, submission {submission_id} dropped");
        }
        PendingSubmission {
            submission_id,
            reply_rx: Some(reply_rx),
        }
    }
}

/// Outcome of checking a pending submission without waiting
#[derive(Debug)]
pub enum PendingState {
    Waiting,
    Done(SubmissionReceipt),
    WorkerGone,
}

/// A submission handed to the worker and not yet resolved
///
/// The reply channel is released once it yields a receipt or reports the
/// worker gone; later calls return the same terminal answer without polling.
#[derive(Debug)]
pub struct PendingSubmission {
    submission_id: String,
    reply_rx: Option<oneshot::Receiver<SubmissionReceipt>>,
}

impl PendingSubmission {
    /// Wait for the worker. None means the worker went away.
    ///
    /// Cancel-safe: dropping this future leaves the submission pending.
    pub async fn receipt(&mut self) -> Option<SubmissionReceipt> {
        let reply_rx = self.reply_rx.as_mut()?;
        let result = reply_rx.await.ok();
        self.reply_rx = None;
        if result.is_none() {
            self.worker_gone();
        }
        result
    }

    pub fn check(&mut self) -> PendingState {
        let Some(reply_rx) = self.reply_rx.as_mut() else {
            return PendingState::WorkerGone;
        };
        match reply_rx.try_recv() {
            Ok(receipt) => {
                self.reply_rx = None;
                PendingState::Done(receipt)
            }
            Err(oneshot::error::TryRecvError::Empty) => PendingState::Waiting,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.reply_rx = None;
                self.worker_gone();
                PendingState::WorkerGone
            }
        }
    }

    fn worker_gone(&self) {
        warn!(
            "Distribution worker went away before resolving {}",
            self.submission_id
        );
    }
}
