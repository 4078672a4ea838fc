//! Fan-out of prompts into generation jobs.

use std::sync::Arc;

use chaotix_core::job::GenerationTask;
use chaotix_core::prompts::{normalize_prompt, parse_prompt_batch};
use chaotix_core::types::JobId;
use chaotix_worker::queue::JobQueue;

use super::EngineError;

/// Submits one generation job per prompt to the configured backend.
///
/// Submission never waits for a job to run. Jobs of one batch execute
/// independently and in no particular order; only the order of the
/// returned ids is fixed (it follows the input).
pub struct JobDispatcher {
    queue: Arc<dyn JobQueue>,
}

impl JobDispatcher {
    pub fn new(queue: Arc<dyn JobQueue>) -> Self {
        Self { queue }
    }

    /// Submit exactly one job for `prompt` and return its id.
    pub async fn dispatch_single(&self, prompt: &str) -> Result<JobId, EngineError> {
        let prompt = normalize_prompt(prompt)?;
        let id = self.queue.submit(GenerationTask::new(prompt)).await?;
        tracing::info!(job_id = %id, "Generation job submitted");
        Ok(id)
    }

    /// Submit one job per non-blank line of `input`, in line order.
    ///
    /// Blank input submits zero jobs. An over-long line still gets its job,
    /// which fails on its own without affecting the rest of the batch.
    pub async fn dispatch_batch(&self, input: &str) -> Result<Vec<JobId>, EngineError> {
        let prompts = parse_prompt_batch(input)?;

        let mut ids = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            ids.push(self.queue.submit(GenerationTask::new(prompt)).await?);
        }

        tracing::info!(jobs = ids.len(), "Generation batch submitted");
        Ok(ids)
    }
}
