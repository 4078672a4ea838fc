//! Handlers for prompt submission and job status.
//!
//! Submissions answer with `303 See Other` pointing at the output view for
//! the submitted job ids, so a browser form post lands on a page it can
//! reload until every image is ready.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use chaotix_core::job::{decode_batch, encode_batch};
use chaotix_core::types::JobId;
use serde::Deserialize;

use crate::engine::JobOutcome;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Form body of `POST /generate/`.
#[derive(Debug, Deserialize)]
pub struct GenerateBatchForm {
    /// Newline-separated prompts. A missing field counts as empty.
    #[serde(default)]
    pub prompts: String,
}

/// Form body of `POST /generate/single/`.
#[derive(Debug, Deserialize)]
pub struct GenerateSingleForm {
    #[serde(default)]
    pub prompt: String,
}

/// Output view location for a batch of jobs.
pub fn output_location(ids: &[JobId]) -> String {
    format!("/output/{}/", encode_batch(ids))
}

/// POST /generate/
///
/// Submit one generation job per non-blank line of `prompts`.
pub async fn generate_batch(
    State(state): State<AppState>,
    Form(form): Form<GenerateBatchForm>,
) -> AppResult<Redirect> {
    let ids = state.dispatcher.dispatch_batch(&form.prompts).await?;
    Ok(Redirect::to(&output_location(&ids)))
}

/// POST /generate/single/
///
/// Submit a generation job for exactly one prompt.
pub async fn generate_single(
    State(state): State<AppState>,
    Form(form): Form<GenerateSingleForm>,
) -> AppResult<Redirect> {
    let id = state.dispatcher.dispatch_single(&form.prompt).await?;
    Ok(Redirect::to(&output_location(&[id])))
}

/// GET /output/{job_ids}/
///
/// Snapshot of every job in the comma-separated `job_ids` list.
pub async fn job_output(
    State(state): State<AppState>,
    Path(job_ids): Path<String>,
) -> AppResult<Json<DataResponse<Vec<JobOutcome>>>> {
    let ids = decode_batch(&job_ids)?;
    let outcomes = state.aggregator.aggregate(&ids).await?;
    Ok(Json(DataResponse { data: outcomes }))
}
