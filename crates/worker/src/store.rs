//! Image record store: the durable result of successful generation runs.
//!
//! A record and its image file are created together. [`ImageStore::create`]
//! writes the file first and inserts the row second; when the insert fails
//! the file is removed again, so no caller ever sees a record without an
//! image or an image without a record.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chaotix_core::naming::new_generated_image_path;
use chaotix_core::types::DbId;
use chaotix_db::models::image::{CreateGeneratedImage, GeneratedImage};
use chaotix_db::repositories::GeneratedImageRepo;
use chaotix_db::DbPool;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};

use crate::media::{MediaError, MediaStorage};

/// Errors from the image record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Image {0} not found")]
    NotFound(DbId),

    #[error("Image payload is empty")]
    EmptyImage,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistent, append-only store of generated images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist a new record for `prompt` with the given image bytes.
    async fn create(&self, prompt: &str, image: &[u8]) -> Result<GeneratedImage, StoreError>;

    /// Fetch a record, failing with [`StoreError::NotFound`] if absent.
    async fn get(&self, id: DbId) -> Result<GeneratedImage, StoreError>;

    /// Lazily stream all records, newest first.
    ///
    /// Every call starts a fresh pass over the store.
    fn list(&self) -> BoxStream<'_, Result<GeneratedImage, StoreError>>;

    /// Load the image bytes a record points at.
    async fn read_image(&self, record: &GeneratedImage) -> Result<Vec<u8>, StoreError>;

    /// Check the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Postgres + local files
// ---------------------------------------------------------------------------

/// Records in Postgres, image files below a local media root.
pub struct PgImageStore {
    pool: DbPool,
    media: MediaStorage,
}

impl PgImageStore {
    pub fn new(pool: DbPool, media: MediaStorage) -> Self {
        Self { pool, media }
    }
}

#[async_trait]
impl ImageStore for PgImageStore {
    async fn create(&self, prompt: &str, image: &[u8]) -> Result<GeneratedImage, StoreError> {
        if image.is_empty() {
            return Err(StoreError::EmptyImage);
        }

        let image_path = new_generated_image_path();
        self.media.write(&image_path, image).await?;

        let input = CreateGeneratedImage {
            prompt: prompt.to_string(),
            image_path,
        };
        match GeneratedImageRepo::create(&self.pool, &input).await {
            Ok(record) => Ok(record),
            Err(e) => {
                if let Err(cleanup) = self.media.remove(&input.image_path).await {
                    tracing::warn!(
                        path = %input.image_path,
                        error = %cleanup,
                        "Failed to remove orphaned image file",
                    );
                }
                Err(e.into())
            }
        }
    }

    async fn get(&self, id: DbId) -> Result<GeneratedImage, StoreError> {
        GeneratedImageRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> BoxStream<'_, Result<GeneratedImage, StoreError>> {
        GeneratedImageRepo::stream_newest_first(&self.pool)
            .map_err(StoreError::from)
            .boxed()
    }

    async fn read_image(&self, record: &GeneratedImage) -> Result<Vec<u8>, StoreError> {
        Ok(self.media.read(&record.image_path).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        chaotix_db::health_check(&self.pool).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryInner {
    next_id: DbId,
    records: Vec<GeneratedImage>,
    images: HashMap<String, Vec<u8>>,
}

/// Process-local store for tests and database-less development runs.
///
/// Ids are assigned sequentially. Nothing survives a restart.
pub struct MemoryImageStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create an empty store whose first record gets id `first_id`.
    pub fn starting_at(first_id: DbId) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                next_id: first_id,
                ..Default::default()
            }),
        }
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // Every mutation is a single push/insert; a poisoned lock still
        // guards consistent data.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn create(&self, prompt: &str, image: &[u8]) -> Result<GeneratedImage, StoreError> {
        if image.is_empty() {
            return Err(StoreError::EmptyImage);
        }

        let mut inner = self.lock();
        let record = GeneratedImage {
            id: inner.next_id,
            prompt: prompt.to_string(),
            image_path: new_generated_image_path(),
            created_at: chrono::Utc::now(),
        };
        inner.next_id += 1;
        inner
            .images
            .insert(record.image_path.clone(), image.to_vec());
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: DbId) -> Result<GeneratedImage, StoreError> {
        self.lock()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> BoxStream<'_, Result<GeneratedImage, StoreError>> {
        let mut snapshot = self.lock().records.clone();
        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        futures::stream::iter(snapshot.into_iter().map(Ok)).boxed()
    }

    async fn read_image(&self, record: &GeneratedImage) -> Result<Vec<u8>, StoreError> {
        self.lock()
            .images
            .get(&record.image_path)
            .cloned()
            .ok_or(StoreError::NotFound(record.id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
