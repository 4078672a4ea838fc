//! Generation engine.
//!
//! Contains the dispatcher that fans a batch of prompts out into one job
//! each, and the aggregator that polls those jobs and resolves finished
//! ones to their stored image records.

pub mod aggregator;
pub mod dispatcher;

use chaotix_core::error::CoreError;
use chaotix_worker::queue::QueueError;
use chaotix_worker::store::StoreError;

pub use aggregator::{JobOutcome, StatusAggregator};
pub use dispatcher::JobDispatcher;

/// Errors raised by the dispatcher and the aggregator.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Queue(#[from] QueueError),
}
