//! Seam between the generation worker and the external image API.

use async_trait::async_trait;
use chaotix_stability::{StabilityApi, StabilityApiError};

/// Produces raw image bytes for a text prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, StabilityApiError>;
}

#[async_trait]
impl ImageGenerator for StabilityApi {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, StabilityApiError> {
        self.text_to_image(prompt).await
    }
}
