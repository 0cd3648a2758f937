#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use translator_backend::config::settings::{AppConfig, StorageBackend};
use translator_backend::infrastructure::provider::{ProviderError, TranslationProvider};
use translator_backend::infrastructure::queue::channel::JobQueue;
use translator_backend::infrastructure::storage::MemoryStorage;
use translator_backend::state::AppState;

/// Prefixes every translation with the target language, so tests can tell
/// translated output from pass-through.
pub struct TaggingProvider;

#[async_trait]
impl TranslationProvider for TaggingProvider {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        Ok(format!("[{target_lang}] {text}"))
    }
}

pub struct FailingProvider;

#[async_trait]
impl TranslationProvider for FailingProvider {
    async fn translate(
        &self,
        _text: &str,
        _source_lang: &str,
        _target_lang: &str,
    ) -> Result<String, ProviderError> {
        Err(ProviderError {
            status_code: 500,
            message: "upstream is down".to_string(),
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        storage_backend: StorageBackend::Memory,
        s3_endpoint: String::new(),
        s3_bucket: "documents".to_string(),
        s3_access_key: String::new(),
        s3_secret_key: String::new(),
        openai_api_key: String::new(),
        openai_base_url: String::new(),
        openai_model: String::new(),
        mymemory_base_url: String::new(),
        max_upload_mb: 1,
        worker_count: 1,
        queue_capacity: 8,
        plain_text_segments: true,
    }
}

/// App state over in-memory storage with the given providers. The storage
/// handle is returned alongside so tests can inspect stored blobs.
pub fn test_state(
    provider: Arc<dyn TranslationProvider>,
    text_provider: Arc<dyn TranslationProvider>,
) -> (AppState, MemoryStorage) {
    let storage = MemoryStorage::new();
    let queue = JobQueue::new(8);
    let state = AppState::new(
        test_config(),
        Arc::new(storage.clone()),
        provider,
        text_provider,
        queue,
    );
    (state, storage)
}

pub const BOUNDARY: &str = "x-test-boundary";

/// Hand-built multipart/form-data body. `file_name` of None makes a plain
/// text part.
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, bytes) = send_raw(app, req).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn send_raw(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes)
}
