use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chaotix_core::job::{GenerationTask, JobState};
use chaotix_core::types::JobId;
use tokio_util::task::TaskTracker;

use super::{JobQueue, QueueError};
use crate::generation::GenerationWorker;

/// How long a finished job's state stays pollable by default (one day).
pub const DEFAULT_RESULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Entry {
    state: JobState,
    /// Set once the job reaches a terminal state.
    finished_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.finished_at.is_some_and(|at| at.elapsed() >= ttl)
    }
}

type JobTable = Arc<Mutex<HashMap<JobId, Entry>>>;

/// Runs each job on its own Tokio task in the current process.
///
/// Job states are kept in memory only and are lost on restart. A finished
/// job's state is dropped once it is older than the result TTL; after that
/// its id polls as Pending, like any unknown id. Unfinished jobs never
/// expire.
pub struct InlineJobQueue {
    worker: Arc<GenerationWorker>,
    jobs: JobTable,
    tracker: TaskTracker,
    result_ttl: Duration,
}

impl InlineJobQueue {
    pub fn new(worker: Arc<GenerationWorker>) -> Self {
        Self::with_result_ttl(worker, DEFAULT_RESULT_TTL)
    }

    /// Create a queue that forgets finished jobs after `result_ttl`.
    pub fn with_result_ttl(worker: Arc<GenerationWorker>, result_ttl: Duration) -> Self {
        Self {
            worker,
            jobs: Arc::new(Mutex::new(HashMap::new())),
            tracker: TaskTracker::new(),
            result_ttl,
        }
    }

    /// Close the tracker and wait for every spawned job to finish.
    pub async fn close_and_wait(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }

    /// Number of jobs still executing.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Drop finished jobs older than the result TTL.
    fn purge_expired(&self) {
        let ttl = self.result_ttl;
        let mut jobs = lock(&self.jobs);
        let before = jobs.len();
        jobs.retain(|_, entry| !entry.is_expired(ttl));
        let purged = before - jobs.len();
        if purged > 0 {
            tracing::debug!(purged, "Expired inline job results dropped");
        }
    }
}

fn lock(jobs: &JobTable) -> std::sync::MutexGuard<'_, HashMap<JobId, Entry>> {
    jobs.lock().unwrap_or_else(|e| e.into_inner())
}

fn set_state(jobs: &JobTable, id: JobId, state: JobState) {
    let finished_at = state.is_ready().then(Instant::now);
    lock(jobs).insert(id, Entry { state, finished_at });
}

#[async_trait]
impl JobQueue for InlineJobQueue {
    async fn submit(&self, task: GenerationTask) -> Result<JobId, QueueError> {
        self.purge_expired();

        let id = JobId::new_v4();
        set_state(&self.jobs, id, JobState::Pending);

        let worker = Arc::clone(&self.worker);
        let jobs = Arc::clone(&self.jobs);
        self.tracker.spawn(async move {
            set_state(&jobs, id, JobState::Running);

            let state = match worker.run(&task.prompt).await {
                Ok(result) => JobState::Success { result },
                Err(e) => {
                    tracing::warn!(job_id = %id, error = %e, "Inline generation job failed");
                    JobState::Failure {
                        error: e.to_string(),
                    }
                }
            };
            set_state(&jobs, id, state);
        });

        tracing::debug!(job_id = %id, "Inline generation job spawned");
        Ok(id)
    }

    async fn poll(&self, id: JobId) -> Result<JobState, QueueError> {
        let state = match lock(&self.jobs).get(&id) {
            Some(entry) if !entry.is_expired(self.result_ttl) => entry.state.clone(),
            _ => JobState::Pending,
        };
        Ok(state)
    }
}
