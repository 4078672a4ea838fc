use async_trait::async_trait;
use chaotix_core::job::{GenerationTask, JobState, JOB_TYPE_GENERATE_IMAGE};
use chaotix_core::types::JobId;
use chaotix_db::repositories::JobRepo;
use chaotix_db::DbPool;

use super::{JobQueue, QueueError};

/// Jobs stored in the `jobs` table.
#[derive(Clone)]
pub struct PgJobQueue {
    pool: DbPool,
}

impl PgJobQueue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobQueue for PgJobQueue {
    async fn submit(&self, task: GenerationTask) -> Result<JobId, QueueError> {
        let parameters = serde_json::to_value(&task)?;
        let job = JobRepo::submit(&self.pool, JOB_TYPE_GENERATE_IMAGE, &parameters).await?;
        Ok(job.id)
    }

    async fn poll(&self, id: JobId) -> Result<JobState, QueueError> {
        let state = JobRepo::find_by_id(&self.pool, id)
            .await?
            .map(|job| job.state())
            .unwrap_or(JobState::Pending);
        Ok(state)
    }
}
