//! HTTP wrapper around the Stability `text-to-image` endpoint.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::config::StabilityConfig;
use crate::types::{ArtifactError, TextToImageRequest, TextToImageResponse};

/// Errors from the Stability REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum StabilityApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with anything other than 200 OK.
    #[error("Stability API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// A 200 response whose artifacts could not be decoded.
    #[error("Invalid generation response: {0}")]
    Artifact(#[from] ArtifactError),
}

/// HTTP client for the Stability text-to-image endpoint.
pub struct StabilityApi {
    client: reqwest::Client,
    config: StabilityConfig,
}

impl StabilityApi {
    /// Create a client, applying the configured timeout if any.
    pub fn new(config: StabilityConfig) -> Result<Self, StabilityApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Generate one image for `prompt` and return its decoded bytes.
    ///
    /// Sends a single request with the fixed generation parameters. Only a
    /// `200 OK` is treated as success; any other status is returned as
    /// [`StabilityApiError::ApiError`] carrying the body. Nothing is
    /// retried.
    pub async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>, StabilityApiError> {
        let request = TextToImageRequest::new(prompt);

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let response = Self::ensure_ok(response).await?;
        let body: TextToImageResponse = response.json().await?;

        tracing::debug!(
            artifacts = body.artifacts.len(),
            "Received text-to-image response",
        );

        Ok(body.first_image()?)
    }

    /// Return the response unchanged on `200 OK`, or an
    /// [`StabilityApiError::ApiError`] with the status and body text.
    async fn ensure_ok(response: reqwest::Response) -> Result<reqwest::Response, StabilityApiError> {
        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StabilityApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
