//! Repository for the `jobs` table.
//!
//! Uses `JobStatus` from `models::status` for every status transition.

use chaotix_core::types::{DbId, JobId};
use sqlx::PgPool;

use crate::models::job::Job;
use crate::models::status::JobStatus;

/// Column list for `jobs` queries.
const COLUMNS: &str = "\
    id, job_type, status_id, parameters, result_image_id, error_message, \
    worker_name, submitted_at, claimed_at, completed_at";

/// Provides queue operations for background generation jobs.
pub struct JobRepo;

impl JobRepo {
    /// Create a new pending job. Returns immediately with the job row.
    pub async fn submit(
        pool: &PgPool,
        job_type: &str,
        parameters: &serde_json::Value,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (id, job_type, status_id, parameters) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(JobId::new_v4())
            .bind(job_type)
            .bind(JobStatus::Pending.id())
            .bind(parameters)
            .fetch_one(pool)
            .await
    }

    /// Find a job by ID.
    pub async fn find_by_id(pool: &PgPool, id: JobId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim the oldest pending job for a worker.
    ///
    /// Uses `SELECT FOR UPDATE SKIP LOCKED` to prevent double-dispatch
    /// when several worker processes poll the same table.
    pub async fn claim_next(
        pool: &PgPool,
        worker_name: &str,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs \
             SET worker_name = $1, claimed_at = NOW(), status_id = $2 \
             WHERE id = ( \
                 SELECT id FROM jobs \
                 WHERE status_id = $3 \
                 ORDER BY submitted_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(worker_name)
            .bind(JobStatus::Running.id())
            .bind(JobStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Mark a job as completed with the id of the image it produced.
    pub async fn complete(
        pool: &PgPool,
        job_id: JobId,
        result_image_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE jobs \
             SET status_id = $2, result_image_id = $3, completed_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Completed.id())
        .bind(result_image_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as failed with an error message.
    ///
    /// No automatic retry is performed.
    pub async fn fail(pool: &PgPool, job_id: JobId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE jobs \
             SET status_id = $2, error_message = $3, completed_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Failed.id())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }
}
