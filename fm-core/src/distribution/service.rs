use crate::catalog::SharedCatalog;
use crate::distribution::handle::DistributionHandle;
use crate::distribution::types::{DistributionCommand, SubmissionReceipt};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Simulated distribution backend.
///
/// Every submission succeeds after a fixed delay and is recorded in the
/// catalog as pending review.
pub struct DistributionService {
    /// Simulated request latency
    delay: Duration,
    /// Channel for receiving submissions from handles
    commands_rx: mpsc::UnboundedReceiver<DistributionCommand>,
    /// Where accepted releases are recorded
    catalog: SharedCatalog,
}

impl DistributionService {
    /// Start the distribution worker.
    ///
    /// Creates one worker task that handles submissions sequentially from a
    /// queue. Returns a handle that can be cloned and used to submit releases.
    pub fn start(
        delay: Duration,
        catalog: SharedCatalog,
        runtime_handle: tokio::runtime::Handle,
    ) -> DistributionHandle {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let mut service = DistributionService {
            delay,
            commands_rx,
            catalog,
        };
        runtime_handle.spawn(async move {
            info!("Distribution worker started");
            loop {
                match service.commands_rx.recv().await {
                    Some(command) => service.do_submit(command).await,
                    None => {
                        info!("Distribution worker receive channel closed");
                        break;
                    }
                }
            }
        });
        DistributionHandle::new(commands_tx)
    }

    async fn do_submit(&self, command: DistributionCommand) {
        let DistributionCommand { request, reply_tx } = command;
        tokio::time::sleep(self.delay).await;

        let release = self.catalog.get().insert_pending(&request);
        let receipt = SubmissionReceipt {
            submission_id: request.submission_id,
            release_id: release.id,
            title: release.title,
            upc: release.upc,
            submitted_at: Utc::now(),
        };
        info!(
            "Submission {} accepted as release {}",
            receipt.submission_id, receipt.release_id
        );
        if reply_tx.send(receipt).is_err() {
            debug!("Submission resolved with nobody waiting for the receipt");
        }
    }
}
