#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chaotix_api::config::{QueueBackend, ServerConfig};
use chaotix_api::router::build_app_router;
use chaotix_api::state::AppState;
use chaotix_core::job::{GenerationTask, JobState};
use chaotix_core::types::JobId;
use chaotix_stability::StabilityApiError;
use chaotix_worker::generation::GenerationWorker;
use chaotix_worker::generator::ImageGenerator;
use chaotix_worker::queue::{InlineJobQueue, JobQueue, QueueError};
use chaotix_worker::store::MemoryImageStore;
use http_body_util::BodyExt;
use tokio::sync::Semaphore;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        queue_backend: QueueBackend::Inline,
        media_root: std::env::temp_dir(),
        inline_result_ttl: std::time::Duration::from_secs(60),
    }
}

/// Stand-in for the external API.
///
/// Each generation waits for a permit on `gate`, then returns the prompt
/// bytes as the image. Prompts starting with `fail` get a 500 response.
pub struct FakeGenerator {
    gate: Arc<Semaphore>,
}

#[async_trait]
impl ImageGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, StabilityApiError> {
        self.gate
            .acquire()
            .await
            .expect("gate closed")
            .forget();
        if prompt.starts_with("fail") {
            return Err(StabilityApiError::ApiError {
                status: 500,
                body: "upstream unavailable".to_string(),
            });
        }
        Ok(prompt.as_bytes().to_vec())
    }
}

/// An application wired to an in-memory store and the inline job backend.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryImageStore>,
    pub queue: Arc<InlineJobQueue>,
    gate: Arc<Semaphore>,
}

impl TestApp {
    /// Generations complete as soon as they are submitted.
    pub fn new() -> Self {
        let app = Self::gated();
        app.gate.add_permits(Semaphore::MAX_PERMITS / 2);
        app
    }

    /// Generations block until [`TestApp::release`] is called.
    pub fn gated() -> Self {
        let gate = Arc::new(Semaphore::new(0));
        let store = Arc::new(MemoryImageStore::new());
        let worker = GenerationWorker::new(
            Arc::new(FakeGenerator { gate: gate.clone() }),
            store.clone(),
        );
        let queue = Arc::new(InlineJobQueue::new(Arc::new(worker)));
        let state = AppState::new(test_config(), store.clone(), queue.clone());
        Self {
            state,
            store,
            queue,
            gate,
        }
    }

    /// Let `n` blocked generations proceed.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    /// Wait until every submitted job has finished.
    pub async fn drain(&self) {
        self.queue.close_and_wait().await;
    }

    pub fn router(&self) -> Router {
        build_app_router(self.state.clone())
    }
}

/// Queue whose every job reports the same state, for exercising the
/// output view without running anything.
pub struct FixedStateQueue(pub JobState);

#[async_trait]
impl JobQueue for FixedStateQueue {
    async fn submit(&self, _task: GenerationTask) -> Result<JobId, QueueError> {
        Ok(JobId::new_v4())
    }

    async fn poll(&self, _id: JobId) -> Result<JobState, QueueError> {
        Ok(self.0.clone())
    }
}

/// Router over an in-memory store and a [`FixedStateQueue`].
pub fn fixed_state_app(state: JobState) -> (Router, Arc<MemoryImageStore>) {
    let store = Arc::new(MemoryImageStore::new());
    let app_state = AppState::new(test_config(), store.clone(), Arc::new(FixedStateQueue(state)));
    (build_app_router(app_state), store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> Response<Body> {
    let body = serde_urlencoded::to_string(pairs).unwrap();

    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Job ids encoded in an `/output/<ids>/` location.
pub fn job_ids_from_location(location: &str) -> Vec<String> {
    location
        .trim_start_matches("/output/")
        .trim_end_matches('/')
        .split(',')
        .map(str::to_string)
        .collect()
}
