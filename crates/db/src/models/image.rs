//! Generated image records (`generated_images` table).

use chaotix_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `generated_images` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct GeneratedImage {
    pub id: DbId,
    pub prompt: String,
    /// Image file location relative to the media root.
    pub image_path: String,
    pub created_at: Timestamp,
}

/// Insert payload for a generated image. The file must already exist.
#[derive(Debug)]
pub struct CreateGeneratedImage {
    pub prompt: String,
    pub image_path: String,
}
