//! Job execution backends.
//!
//! The dispatcher and the status aggregator only see [`JobQueue`]:
//! `submit` hands a task to a backend and returns its id immediately,
//! `poll` reports the job's current [`JobState`]. Two backends exist:
//!
//! - [`PgJobQueue`]: a row in `jobs`, executed by a `chaotix-worker`
//!   process via [`JobRunner`](crate::runner::JobRunner).
//! - [`InlineJobQueue`]: a Tokio task inside the submitting process.

mod inline;
mod postgres;

use async_trait::async_trait;
use chaotix_core::job::{GenerationTask, JobState};
use chaotix_core::types::JobId;

pub use inline::InlineJobQueue;
pub use postgres::PgJobQueue;

/// Errors talking to a job backend.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid job parameters: {0}")]
    Parameters(#[from] serde_json::Error),
}

/// An asynchronous execution backend for generation tasks.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue one task and return its id without waiting for it to run.
    async fn submit(&self, task: GenerationTask) -> Result<JobId, QueueError>;

    /// Report the current state of a job.
    ///
    /// Ids the backend does not know are reported as
    /// [`JobState::Pending`].
    async fn poll(&self, id: JobId) -> Result<JobState, QueueError>;
}
