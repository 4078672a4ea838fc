use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chaotix_core::error::CoreError;
use chaotix_worker::queue::QueueError;
use chaotix_worker::store::StoreError;
use serde_json::json;

use crate::engine::EngineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the store/queue layer errors.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `chaotix_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An image record store error other than a missing record.
    #[error(transparent)]
    Store(StoreError),

    /// A job backend error.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Entity name reported for missing image records.
const IMAGE_ENTITY: &str = "GeneratedImage";

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::Core(CoreError::NotFound {
                entity: IMAGE_ENTITY,
                id,
            }),
            other => AppError::Store(other),
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Core(e) => AppError::Core(e),
            EngineError::Store(e) => AppError::from(e),
            EngineError::Queue(e) => AppError::Queue(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Store errors ---
            AppError::Store(err) => {
                tracing::error!(error = %err, "Image store error");
                internal()
            }

            // --- Queue errors ---
            AppError::Queue(err) => {
                tracing::error!(error = %err, "Job queue error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Sanitized 500 triple; details only go to the log.
fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
