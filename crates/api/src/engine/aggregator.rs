//! Point-in-time status view over a batch of generation jobs.

use std::sync::Arc;

use chaotix_core::job::JobState;
use chaotix_core::types::JobId;
use chaotix_db::models::image::GeneratedImage;
use chaotix_worker::queue::JobQueue;
use chaotix_worker::store::{ImageStore, StoreError};
use futures::future::try_join_all;
use serde::Serialize;

use super::EngineError;

/// Reported when a job succeeded but its image record is gone.
pub const IMAGE_NOT_FOUND_MESSAGE: &str = "Image not found in database.";

/// Reported for every job that has not produced an image yet.
pub const PENDING_MESSAGE: &str = "Image is still being generated. Please wait.";

/// What the caller sees for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome {
    Success { job_id: JobId, image: GeneratedImage },
    Error { job_id: JobId, message: String },
    Pending { job_id: JobId, message: String },
}

/// Polls every job of a batch and resolves finished ones to their records.
///
/// Each call is an independent snapshot: nothing is cached between calls
/// and callers re-invoke until every outcome is `Success` or `Error`.
pub struct StatusAggregator {
    queue: Arc<dyn JobQueue>,
    store: Arc<dyn ImageStore>,
}

impl StatusAggregator {
    pub fn new(queue: Arc<dyn JobQueue>, store: Arc<dyn ImageStore>) -> Self {
        Self { queue, store }
    }

    /// One outcome per id, in the order given. Polls run concurrently.
    pub async fn aggregate(&self, job_ids: &[JobId]) -> Result<Vec<JobOutcome>, EngineError> {
        try_join_all(job_ids.iter().map(|&id| self.outcome(id))).await
    }

    async fn outcome(&self, job_id: JobId) -> Result<JobOutcome, EngineError> {
        let state = self.queue.poll(job_id).await?;

        match state {
            JobState::Success { result } => match self.store.get(result).await {
                Ok(image) => Ok(JobOutcome::Success { job_id, image }),
                Err(StoreError::NotFound(_)) => {
                    tracing::warn!(%job_id, image_id = result, "Job result has no image record");
                    Ok(JobOutcome::Error {
                        job_id,
                        message: IMAGE_NOT_FOUND_MESSAGE.to_string(),
                    })
                }
                Err(e) => Err(e.into()),
            },
            // Failed jobs read as pending, exactly like running ones.
            JobState::Failure { error } => {
                tracing::debug!(%job_id, %error, "Failed job reported as pending");
                Ok(pending(job_id))
            }
            JobState::Pending | JobState::Running => Ok(pending(job_id)),
        }
    }
}

fn pending(job_id: JobId) -> JobOutcome {
    JobOutcome::Pending {
        job_id,
        message: PENDING_MESSAGE.to_string(),
    }
}
