mod handle;
mod service;
mod types;

pub use handle::{DistributionHandle, PendingState, PendingSubmission};
pub use service::DistributionService;
pub use types::{DistributionRequest, SubmissionReceipt, TrackSubmission};
