//! Repository for the `generated_images` table.

use chaotix_core::types::DbId;
use futures::stream::BoxStream;
use sqlx::PgPool;

use crate::models::image::{CreateGeneratedImage, GeneratedImage};

/// Newest-first listing. A literal so the query outlives any one call.
const LIST_NEWEST_FIRST: &str = "SELECT id, prompt, image_path, created_at \
     FROM generated_images \
     ORDER BY created_at DESC, id DESC";

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, prompt, image_path, created_at";

/// Provides insert and read operations for generated images.
///
/// Records are immutable, so there is no update method.
pub struct GeneratedImageRepo;

impl GeneratedImageRepo {
    /// Insert a new record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGeneratedImage,
    ) -> Result<GeneratedImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO generated_images (prompt, image_path)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(&input.prompt)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GeneratedImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generated_images WHERE id = $1");
        sqlx::query_as::<_, GeneratedImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Stream every record, most recently created first.
    ///
    /// Rows are fetched lazily as the stream is polled; dropping the stream
    /// early abandons the rest of the query.
    pub fn stream_newest_first(
        pool: &PgPool,
    ) -> BoxStream<'_, Result<GeneratedImage, sqlx::Error>> {
        sqlx::query_as::<_, GeneratedImage>(LIST_NEWEST_FIRST).fetch(pool)
    }
}
