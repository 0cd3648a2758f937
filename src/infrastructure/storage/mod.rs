use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod memory;
pub mod s3;

pub use memory::MemoryStorage;
pub use s3::S3Storage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("blob not found: {0}")]
    NotFound(String),
}

/// Persisted-blob abstraction over the document store. Keys are chosen by
/// the caller; the returned ref is opaque and stable for the life of the
/// blob.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Durably persists `bytes` at `key` and returns the blob ref.
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str)
    -> Result<String, StorageError>;

    async fn get(&self, storage_ref: &str) -> Result<Bytes, StorageError>;

    /// Stable URL for direct access to a blob. May use a backend-specific
    /// scheme (the in-memory backend returns `memory://` refs).
    fn public_url(&self, storage_ref: &str) -> String;
}
