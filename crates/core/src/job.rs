//! Job vocabulary shared between the dispatcher, the queue backends and
//! the status aggregator.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, JobId};

/// Task name for a text-to-image generation run.
pub const JOB_TYPE_GENERATE_IMAGE: &str = "generate_image";

/// Separator used when a batch of job ids travels as a single path segment.
const BATCH_SEPARATOR: char = ',';

/// Arguments of one generation job, stored as the job's `parameters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationTask {
    pub prompt: String,
}

impl GenerationTask {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// State of a job as observed by polling its backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Submitted, not yet picked up (also reported for unknown ids).
    Pending,
    /// Claimed by a worker and executing.
    Running,
    /// Finished; `result` is the id of the image record it produced.
    Success { result: DbId },
    /// Finished with an error payload.
    Failure { error: String },
}

impl JobState {
    /// Whether the job has reached a terminal state.
    pub fn is_ready(&self) -> bool {
        matches!(self, JobState::Success { .. } | JobState::Failure { .. })
    }
}

/// Serialize a batch of job ids into the comma-joined handle handed back
/// to the caller.
pub fn encode_batch(ids: &[JobId]) -> String {
    ids.iter()
        .map(JobId::to_string)
        .collect::<Vec<_>>()
        .join(&BATCH_SEPARATOR.to_string())
}

/// Parse a comma-joined batch handle back into job ids.
///
/// Surrounding whitespace and empty segments are ignored. Fails with
/// [`CoreError::Validation`] on a malformed id or when no ids remain.
pub fn decode_batch(handle: &str) -> Result<Vec<JobId>, CoreError> {
    let ids = handle
        .split(BATCH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .parse::<JobId>()
                .map_err(|_| CoreError::Validation(format!("Invalid job id: {segment}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(CoreError::Validation("No job ids provided".to_string()));
    }
    Ok(ids)
}
