pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /generate/                 submit newline-separated prompts (POST)
/// /generate/single/          submit one prompt (POST)
/// /output/{job_ids}/         status of comma-separated job ids (GET)
/// /images/                   list images, newest first (GET)
/// /images/{id}/              image detail (GET)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/generate/", post(handlers::generation::generate_batch))
        .route("/generate/single/", post(handlers::generation::generate_single))
        .route("/output/{job_ids}/", get(handlers::generation::job_output))
        .route("/images/", get(handlers::images::list_images))
        .route("/images/{id}/", get(handlers::images::get_image))
}
