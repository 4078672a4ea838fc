use std::sync::Arc;

use chaotix_worker::queue::JobQueue;
use chaotix_worker::store::ImageStore;

use crate::config::ServerConfig;
use crate::engine::{JobDispatcher, StatusAggregator};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image record store.
    pub store: Arc<dyn ImageStore>,
    /// Fans prompts out into generation jobs.
    pub dispatcher: Arc<JobDispatcher>,
    /// Resolves job ids to outcomes.
    pub aggregator: Arc<StatusAggregator>,
}

impl AppState {
    /// Wire the engine around one store and one job backend.
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn ImageStore>,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(JobDispatcher::new(Arc::clone(&queue))),
            aggregator: Arc::new(StatusAggregator::new(queue, Arc::clone(&store))),
            store,
        }
    }
}
