use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Builder, Credentials, Region};
use aws_sdk_s3::{Client, primitives::ByteStream};
use bytes::Bytes;
use tracing::info;

use super::{StorageError, StorageGateway};

/// S3-compatible object storage (MinIO in local deployments).
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    endpoint: String,
}

impl S3Storage {
    pub async fn new(endpoint: &str, bucket: &str, access_key: &str, secret_key: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        let client = Client::from_conf(config);

        info!("Connected to S3 storage at {}", endpoint);

        Self {
            client,
            bucket: bucket.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StorageGateway for S3Storage {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                let msg = service_err.to_string();
                // MinIO reports bucket quota violations as EntityTooLarge.
                if msg.contains("EntityTooLarge") || msg.contains("QuotaExceeded") {
                    StorageError::QuotaExceeded(msg)
                } else {
                    StorageError::Unavailable(msg)
                }
            })?;

        Ok(key.to_string())
    }

    async fn get(&self, storage_ref: &str) -> Result<Bytes, StorageError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(storage_ref)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    StorageError::NotFound(storage_ref.to_string())
                } else {
                    StorageError::Unavailable(service_err.to_string())
                }
            })?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        Ok(data.into_bytes())
    }

    fn public_url(&self, storage_ref: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, storage_ref)
    }
}
