//! Image generation worker library.
//!
//! Holds everything needed to turn a prompt into a stored image record:
//!
//! - [`media`]: files below the media root.
//! - [`store`]: the [`ImageStore`](store::ImageStore) record store and its
//!   Postgres and in-memory implementations.
//! - [`generator`]: the seam to the external text-to-image API.
//! - [`generation`]: the [`GenerationWorker`](generation::GenerationWorker)
//!   that runs one prompt end to end.
//! - [`queue`]: the [`JobQueue`](queue::JobQueue) execution backends.
//! - [`runner`]: the polling loop that executes Postgres-queued jobs.

pub mod config;
pub mod generation;
pub mod generator;
pub mod media;
pub mod queue;
pub mod runner;
pub mod shutdown;
pub mod store;
