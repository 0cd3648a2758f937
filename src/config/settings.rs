use serde::Deserialize;

use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub storage_backend: StorageBackend,
    pub s3_endpoint: String,
    pub s3_bucket: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub mymemory_base_url: String,
    pub max_upload_mb: u64,
    pub worker_count: usize,
    pub queue_capacity: usize,
    pub plain_text_segments: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Memory,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        let storage_backend = match env::get_or(EnvKey::StorageBackend, "memory").as_str() {
            "s3" => StorageBackend::S3,
            _ => StorageBackend::Memory,
        };

        // S3 credentials are only required when the s3 backend is selected.
        let (s3_endpoint, s3_bucket, s3_access_key, s3_secret_key) =
            if storage_backend == StorageBackend::S3 {
                (
                    env::get(EnvKey::S3Endpoint)?,
                    env::get(EnvKey::S3Bucket)?,
                    env::get(EnvKey::S3AccessKey)?,
                    env::get(EnvKey::S3SecretKey)?,
                )
            } else {
                (
                    env::get_or(EnvKey::S3Endpoint, ""),
                    env::get_or(EnvKey::S3Bucket, "documents"),
                    env::get_or(EnvKey::S3AccessKey, ""),
                    env::get_or(EnvKey::S3SecretKey, ""),
                )
            };

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 8001),
            storage_backend,
            s3_endpoint,
            s3_bucket,
            s3_access_key,
            s3_secret_key,
            openai_api_key: env::get_or(EnvKey::OpenAiApiKey, ""),
            openai_base_url: env::get_or(EnvKey::OpenAiBaseUrl, "https://api.openai.com/v1"),
            openai_model: env::get_or(EnvKey::OpenAiModel, "gpt-4o"),
            mymemory_base_url: env::get_or(
                EnvKey::MyMemoryBaseUrl,
                "https://api.mymemory.translated.net",
            ),
            max_upload_mb: env::get_parsed(EnvKey::MaxUploadMb, 300),
            worker_count: env::get_parsed(EnvKey::WorkerCount, 1),
            queue_capacity: env::get_parsed(EnvKey::QueueCapacity, 64),
            plain_text_segments: env::get_parsed(EnvKey::PlainTextSegments, false),
        })
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}
