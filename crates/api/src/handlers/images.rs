//! Handlers for browsing stored images.

use axum::extract::{Path, Query, State};
use axum::Json;
use chaotix_core::types::DbId;
use chaotix_db::models::image::GeneratedImage;
use futures::{StreamExt, TryStreamExt};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /images/
///
/// List images, newest first. Supports optional `limit` and `offset`.
pub async fn list_images(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<GeneratedImage>>>> {
    let images: Vec<GeneratedImage> = state
        .store
        .list()
        .skip(params.offset())
        .take(params.limit())
        .try_collect()
        .await?;
    Ok(Json(DataResponse { data: images }))
}

/// GET /images/{id}/
///
/// A single image record; 404 if it does not exist.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneratedImage>>> {
    let image = state.store.get(id).await?;
    Ok(Json(DataResponse { data: image }))
}
