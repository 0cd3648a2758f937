use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::common::response::ApiResponse;
use crate::infrastructure::provider::ProviderError;
use crate::infrastructure::storage::StorageError;
use crate::pipeline::codec::CodecError;

/// Error taxonomy for the whole service. Every failure is scoped to one job
/// or one request; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation { reasons: Vec<String> },

    #[error("translation provider error ({status_code}): {message}")]
    Provider { status_code: u16, message: String },

    #[error("storage backend unavailable: {0}")]
    StorageUnavailable(String),

    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("corrupt document: {0}")]
    CorruptDocument(String),

    #[error("not found")]
    NotFound,
}

impl AppError {
    pub fn validation(reason: impl Into<String>) -> Self {
        AppError::Validation {
            reasons: vec![reason.into()],
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Provider { .. } => StatusCode::BAD_GATEWAY,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::QuotaExceeded(_) => StatusCode::INSUFFICIENT_STORAGE,
            AppError::UnsupportedFormat(_) | AppError::CorruptDocument(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::Validation { reasons } => {
                ApiResponse::<()>::error_with_details(&self.to_string(), reasons.clone())
            }
            other => ApiResponse::<()>::error(&other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Unavailable(msg) => AppError::StorageUnavailable(msg),
            StorageError::QuotaExceeded(msg) => AppError::QuotaExceeded(msg),
            StorageError::NotFound(_) => AppError::NotFound,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Provider {
            status_code: e.status_code,
            message: e.message,
        }
    }
}

impl From<CodecError> for AppError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::UnsupportedFormat(msg) => AppError::UnsupportedFormat(msg),
            CodecError::CorruptDocument(msg) => AppError::CorruptDocument(msg),
        }
    }
}
