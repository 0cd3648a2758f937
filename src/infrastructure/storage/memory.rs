use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{StorageError, StorageGateway};

/// In-process blob store for development and tests. Enforces an optional
/// total-size quota so quota failures can be exercised without a real
/// backend.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    blobs: Arc<RwLock<HashMap<String, Bytes>>>,
    quota_bytes: Option<u64>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            blobs: Arc::new(RwLock::new(HashMap::new())),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub async fn blob_count(&self) -> usize {
        self.blobs.read().await.len()
    }
}

#[async_trait]
impl StorageGateway for MemoryStorage {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let mut blobs = self.blobs.write().await;

        if let Some(quota) = self.quota_bytes {
            let used: u64 = blobs.values().map(|b| b.len() as u64).sum();
            if used + bytes.len() as u64 > quota {
                return Err(StorageError::QuotaExceeded(format!(
                    "{} byte quota exhausted",
                    quota
                )));
            }
        }

        blobs.insert(key.to_string(), bytes);
        Ok(key.to_string())
    }

    async fn get(&self, storage_ref: &str) -> Result<Bytes, StorageError> {
        self.blobs
            .read()
            .await
            .get(storage_ref)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_ref.to_string()))
    }

    fn public_url(&self, storage_ref: &str) -> String {
        format!("memory://{storage_ref}")
    }
}
