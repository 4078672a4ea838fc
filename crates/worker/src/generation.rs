//! One prompt in, one stored image record out.

use std::sync::Arc;

use chaotix_core::error::CoreError;
use chaotix_core::prompts::check_length;
use chaotix_core::types::DbId;
use chaotix_stability::{StabilityApi, StabilityApiError, StabilityConfig};

use crate::generator::ImageGenerator;
use crate::store::{ImageStore, StoreError};

/// Why a generation run produced no record.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The prompt cannot be stored, so the API is never called.
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(#[from] CoreError),

    /// The external API failed or answered with something unusable.
    #[error("Failed to generate image: {0}")]
    ExternalApi(#[from] StabilityApiError),

    /// The image was generated but could not be stored.
    #[error("Failed to store image: {0}")]
    Store(#[from] StoreError),
}

/// Runs a single text-to-image generation and persists the result.
///
/// Runs share nothing but the store, so any number may execute
/// concurrently. There is no idempotency: the same prompt twice produces
/// two records.
pub struct GenerationWorker {
    generator: Arc<dyn ImageGenerator>,
    store: Arc<dyn ImageStore>,
}

impl GenerationWorker {
    pub fn new(generator: Arc<dyn ImageGenerator>, store: Arc<dyn ImageStore>) -> Self {
        Self { generator, store }
    }

    /// Build a worker that talks to the Stability API with `config`.
    pub fn with_stability(
        config: StabilityConfig,
        store: Arc<dyn ImageStore>,
    ) -> Result<Self, StabilityApiError> {
        let api = StabilityApi::new(config)?;
        Ok(Self::new(Arc::new(api), store))
    }

    /// Generate an image for `prompt`, store it, and return the record id.
    ///
    /// Failures are returned as-is and never retried here.
    pub async fn run(&self, prompt: &str) -> Result<DbId, GenerationError> {
        check_length(prompt)?;
        let started = std::time::Instant::now();

        let image = self.generator.generate(prompt).await?;
        let record = self.store.create(prompt, &image).await?;

        tracing::info!(
            image_id = record.id,
            bytes = image.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated image stored",
        );

        Ok(record.id)
    }
}
