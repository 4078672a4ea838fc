//! Generation job rows (`jobs` table).

use chaotix_core::job::JobState;
use chaotix_core::types::{DbId, JobId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::status::{JobStatus, StatusId};

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: JobId,
    pub job_type: String,
    pub status_id: StatusId,
    pub parameters: serde_json::Value,
    pub result_image_id: Option<DbId>,
    pub error_message: Option<String>,
    pub worker_name: Option<String>,
    pub submitted_at: Timestamp,
    pub claimed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl Job {
    /// Project the row onto the backend-neutral [`JobState`].
    ///
    /// A completed row without a result id is reported as a failure, since
    /// there is no record it could resolve to.
    pub fn state(&self) -> JobState {
        match JobStatus::from_id(self.status_id) {
            Some(JobStatus::Pending) | None => JobState::Pending,
            Some(JobStatus::Running) => JobState::Running,
            Some(JobStatus::Completed) => match self.result_image_id {
                Some(result) => JobState::Success { result },
                None => JobState::Failure {
                    error: "Job completed without a result".to_string(),
                },
            },
            Some(JobStatus::Failed) => JobState::Failure {
                error: self
                    .error_message
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(status: JobStatus) -> Job {
        Job {
            id: JobId::new_v4(),
            job_type: "generate_image".to_string(),
            status_id: status.id(),
            parameters: serde_json::json!({ "prompt": "a cat" }),
            result_image_id: None,
            error_message: None,
            worker_name: None,
            submitted_at: chrono::Utc::now(),
            claimed_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn pending_and_running_rows() {
        assert_eq!(job(JobStatus::Pending).state(), JobState::Pending);
        assert_eq!(job(JobStatus::Running).state(), JobState::Running);
    }

    #[test]
    fn completed_row_carries_result() {
        let mut row = job(JobStatus::Completed);
        row.result_image_id = Some(42);
        assert_eq!(row.state(), JobState::Success { result: 42 });
    }

    #[test]
    fn completed_row_without_result_is_failure() {
        assert!(matches!(
            job(JobStatus::Completed).state(),
            JobState::Failure { .. }
        ));
    }

    #[test]
    fn failed_row_carries_error_message() {
        let mut row = job(JobStatus::Failed);
        row.error_message = Some("Stability API error (401): unauthorized".to_string());
        assert_eq!(
            row.state(),
            JobState::Failure {
                error: "Stability API error (401): unauthorized".to_string()
            }
        );
    }

    #[test]
    fn unknown_status_is_pending() {
        let mut row = job(JobStatus::Pending);
        row.status_id = 42;
        assert_eq!(row.state(), JobState::Pending);
    }
}
