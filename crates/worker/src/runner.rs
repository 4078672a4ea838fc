//! Polling job runner for the Postgres queue.
//!
//! Claims pending jobs every `poll_interval` and executes each on its own
//! Tokio task, keeping at most `concurrency` jobs in flight. Claiming uses
//! `SELECT FOR UPDATE SKIP LOCKED` via [`JobRepo::claim_next`], so several
//! worker processes can share one table without double execution.

use std::sync::Arc;
use std::time::Duration;

use chaotix_core::job::{GenerationTask, JOB_TYPE_GENERATE_IMAGE};
use chaotix_db::models::job::Job;
use chaotix_db::repositories::JobRepo;
use chaotix_db::DbPool;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::WorkerConfig;
use crate::generation::GenerationWorker;

/// Background runner executing queued generation jobs.
pub struct JobRunner {
    pool: DbPool,
    worker: Arc<GenerationWorker>,
    worker_name: String,
    poll_interval: Duration,
    slots: Arc<Semaphore>,
    tracker: TaskTracker,
}

impl JobRunner {
    pub fn new(pool: DbPool, worker: Arc<GenerationWorker>, config: &WorkerConfig) -> Self {
        Self {
            pool,
            worker,
            worker_name: config.worker_name.clone(),
            poll_interval: config.poll_interval,
            slots: Arc::new(Semaphore::new(config.concurrency)),
            tracker: TaskTracker::new(),
        }
    }

    /// Run the polling loop until `cancel` fires, then wait for in-flight
    /// jobs to finish.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            worker_name = %self.worker_name,
            concurrency = self.slots.available_permits(),
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Job runner started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Job runner shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.fill_slots().await {
                        tracing::error!(error = %e, "Claim cycle failed");
                    }
                }
            }
        }

        self.tracker.close();
        tracing::info!(in_flight = self.tracker.len(), "Waiting for in-flight jobs");
        self.tracker.wait().await;
    }

    /// Claim jobs until every slot is busy or the queue is empty.
    async fn fill_slots(&self) -> Result<(), sqlx::Error> {
        while let Ok(permit) = Arc::clone(&self.slots).try_acquire_owned() {
            let Some(job) = JobRepo::claim_next(&self.pool, &self.worker_name).await? else {
                break;
            };

            tracing::info!(
                job_id = %job.id,
                job_type = %job.job_type,
                worker_name = %self.worker_name,
                "Job claimed",
            );

            let pool = self.pool.clone();
            let worker = Arc::clone(&self.worker);
            self.tracker.spawn(execute(pool, worker, job, permit));
        }
        Ok(())
    }
}

/// Execute one claimed job and record its outcome.
async fn execute(
    pool: DbPool,
    worker: Arc<GenerationWorker>,
    job: Job,
    _permit: OwnedSemaphorePermit,
) {
    let outcome = match job.job_type.as_str() {
        JOB_TYPE_GENERATE_IMAGE => match serde_json::from_value::<GenerationTask>(job.parameters) {
            Ok(task) => worker.run(&task.prompt).await.map_err(|e| e.to_string()),
            Err(e) => Err(format!("Invalid job parameters: {e}")),
        },
        other => Err(format!("Unknown job type: {other}")),
    };

    let recorded = match outcome {
        Ok(image_id) => {
            tracing::info!(job_id = %job.id, image_id, "Job completed");
            JobRepo::complete(&pool, job.id, image_id).await
        }
        Err(error) => {
            tracing::warn!(job_id = %job.id, error = %error, "Job failed");
            JobRepo::fail(&pool, job.id, &error).await
        }
    };

    if let Err(e) = recorded {
        tracing::error!(job_id = %job.id, error = %e, "Failed to record job outcome");
    }
}
