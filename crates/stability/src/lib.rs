//! Stability AI text-to-image REST client.
//!
//! Provides the request/response types of the `text-to-image` endpoint, an
//! HTTP wrapper around it using [`reqwest`], and the configuration holding
//! the bearer credential.

pub mod api;
pub mod config;
pub mod types;

pub use api::{StabilityApi, StabilityApiError};
pub use config::StabilityConfig;
pub use types::{GenerationParams, TextToImageRequest, TextToImageResponse};
