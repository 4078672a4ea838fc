//! `PgImageStore` against a real database and a temporary media root.

use assert_matches::assert_matches;
use chaotix_worker::media::MediaStorage;
use chaotix_worker::store::{ImageStore, PgImageStore, StoreError};
use futures::TryStreamExt;
use sqlx::PgPool;

/// Files currently stored under `<root>/generated_images`.
fn stored_files(root: &std::path::Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(root.join("generated_images")) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_writes_file_and_row(pool: PgPool) {
    let media_dir = tempfile::tempdir().unwrap();
    let store = PgImageStore::new(pool, MediaStorage::new(media_dir.path()));

    let record = store.create("a cat", b"png-bytes").await.unwrap();

    assert_eq!(store.get(record.id).await.unwrap(), record);
    assert_eq!(store.read_image(&record).await.unwrap(), b"png-bytes");
    assert_eq!(stored_files(media_dir.path()).len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_insert_leaves_no_file_behind(pool: PgPool) {
    let media_dir = tempfile::tempdir().unwrap();
    sqlx::query("DROP TABLE generated_images")
        .execute(&pool)
        .await
        .unwrap();
    let store = PgImageStore::new(pool, MediaStorage::new(media_dir.path()));

    let result = store.create("a cat", b"png-bytes").await;

    assert_matches!(result, Err(StoreError::Database(_)));
    assert!(stored_files(media_dir.path()).is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_image_touches_neither_table_nor_disk(pool: PgPool) {
    let media_dir = tempfile::tempdir().unwrap();
    let store = PgImageStore::new(pool, MediaStorage::new(media_dir.path()));

    assert_matches!(store.create("a cat", b"").await, Err(StoreError::EmptyImage));

    let listed: Vec<_> = store.list().try_collect().await.unwrap();
    assert!(listed.is_empty());
    assert!(stored_files(media_dir.path()).is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_record_is_not_found(pool: PgPool) {
    let media_dir = tempfile::tempdir().unwrap();
    let store = PgImageStore::new(pool, MediaStorage::new(media_dir.path()));

    assert_matches!(store.get(999).await, Err(StoreError::NotFound(999)));
}
