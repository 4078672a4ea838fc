//! Local file storage for generated images.
//!
//! Paths handed to [`MediaStorage`] are relative to its root and are
//! stored as-is on image records; absolute paths and `..` components are
//! rejected so a record can never point outside the root.

use std::path::{Component, Path, PathBuf};

/// Errors from the media file layer.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("Media I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Files stored below a single root directory.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a relative media path to its location on disk.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, MediaError> {
        let path = Path::new(relative);
        let is_plain = !relative.is_empty()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(MediaError::InvalidPath(relative.to_string()));
        }
        Ok(self.root.join(path))
    }

    /// Write `bytes` to `relative`, creating parent directories.
    ///
    /// The file is written under a temporary name and renamed into place,
    /// so readers never observe a partially written image.
    pub async fn write(&self, relative: &str, bytes: &[u8]) -> Result<(), MediaError> {
        let dest = self.resolve(relative)?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut staging = dest.clone().into_os_string();
        staging.push(".part");
        let staging = PathBuf::from(staging);

        tokio::fs::write(&staging, bytes).await?;
        if let Err(e) = tokio::fs::rename(&staging, &dest).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Read the file at `relative`.
    pub async fn read(&self, relative: &str) -> Result<Vec<u8>, MediaError> {
        let path = self.resolve(relative)?;
        Ok(tokio::fs::read(path).await?)
    }

    /// Remove the file at `relative`. Missing files are not an error.
    pub async fn remove(&self, relative: &str) -> Result<(), MediaError> {
        let path = self.resolve(relative)?;
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
