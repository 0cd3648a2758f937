use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    StorageBackend,
    S3Endpoint,
    S3Bucket,
    S3AccessKey,
    S3SecretKey,
    OpenAiApiKey,
    OpenAiBaseUrl,
    OpenAiModel,
    MyMemoryBaseUrl,
    MaxUploadMb,
    WorkerCount,
    QueueCapacity,
    PlainTextSegments,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::StorageBackend => "STORAGE_BACKEND",
            EnvKey::S3Endpoint => "S3_ENDPOINT",
            EnvKey::S3Bucket => "S3_BUCKET_DOCUMENTS",
            EnvKey::S3AccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::S3SecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::OpenAiApiKey => "OPENAI_API_KEY",
            EnvKey::OpenAiBaseUrl => "OPENAI_BASE_URL",
            EnvKey::OpenAiModel => "OPENAI_MODEL",
            EnvKey::MyMemoryBaseUrl => "MYMEMORY_BASE_URL",
            EnvKey::MaxUploadMb => "MAX_UPLOAD_MB",
            EnvKey::WorkerCount => "WORKER_COUNT",
            EnvKey::QueueCapacity => "QUEUE_CAPACITY",
            EnvKey::PlainTextSegments => "PLAIN_TEXT_SEGMENTS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
