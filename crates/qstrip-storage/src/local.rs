//! Local filesystem storage implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{Storage, StorageError, StorageResult};

/// Stores uploads as flat files under one base directory.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create the storage root if needed and return a handle to it.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a key to a path, refusing anything that could escape the
    /// storage root. Keys are bare filenames; separators, parent
    /// references, and absolute paths are invalid.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty()
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
            || key.starts_with('.')
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn save(&self, filename: &str, data: Vec<u8>) -> StorageResult<String> {
        let path = self.key_to_path(filename)?;
        let size = data.len();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create {}: {}", path.display(), e))
        })?;
        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write {}: {}", path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), size_bytes = size, "stored file");

        Ok(path.to_string_lossy().into_owned())
    }

    async fn read(&self, filename: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(filename)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    async fn delete(&self, filename: &str) -> StorageResult<()> {
        let path = self.key_to_path(filename)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "deleted file");
        Ok(())
    }

    async fn exists(&self, filename: &str) -> StorageResult<bool> {
        let path = self.key_to_path(filename)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }
}
