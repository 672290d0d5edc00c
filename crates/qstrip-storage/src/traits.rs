//! Storage abstraction trait
//!
//! The coordinator and the file-serving handler work against this seam
//! so the backing store stays swappable.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// **Key format:** a bare filename (no separators); resolution inside
/// the backend must refuse keys that escape the storage root.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under `filename`, returning the storage path
    /// recorded on the submission.
    async fn save(&self, filename: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Read a file back by its key.
    async fn read(&self, filename: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its key. Deleting an absent file is not an error.
    async fn delete(&self, filename: &str) -> StorageResult<()>;

    /// Whether a file exists under this key.
    async fn exists(&self, filename: &str) -> StorageResult<bool>;
}
