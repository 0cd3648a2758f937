use axum::{
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use uuid::Uuid;

use super::dto::{JobStatusResponse, RejectedFile, SubmitResponse};
use super::service::QueueService;
use super::store::QueueStats;
use crate::common::error::AppError;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::common::upload::{BufferedUpload, UploadError, read_field_capped};
use crate::state::AppState;

/// Submit a batch of documents for translation
#[utoipa::path(
    post,
    path = "/api/queue/submit",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 202, description = "Job queued", body = ApiResponse<SubmitResponse>),
        (status = 400, description = "Validation failed"),
        (status = 503, description = "Storage unavailable")
    ),
    tag = "Queue"
)]
pub async fn submit(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    let max_bytes = state.config.max_upload_bytes();

    let mut files: Vec<BufferedUpload> = Vec::new();
    let mut rejected: Vec<RejectedFile> = Vec::new();
    let mut glossary: Option<BufferedUpload> = None;
    let mut source_lang: Option<String> = None;
    let mut target_lang: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return AppError::validation(format!("malformed multipart body: {e}"))
                    .into_response();
            }
        };

        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "files" => {
                let name = field.file_name().unwrap_or("unnamed").to_string();
                match read_field_capped(field, max_bytes).await {
                    Ok(upload) => files.push(upload),
                    // Oversized files are a per-file rejection, not a
                    // batch failure; the rest of the form is still read.
                    Err(UploadError::TooLarge { max_mb }) => rejected.push(RejectedFile {
                        name,
                        reason: format!("exceeds the {max_mb} MB upload limit"),
                    }),
                    Err(e) => return AppError::validation(e.to_string()).into_response(),
                }
            }
            "glossary" => match read_field_capped(field, max_bytes).await {
                Ok(upload) => glossary = Some(upload),
                Err(e) => {
                    return AppError::validation(format!("glossary: {e}")).into_response();
                }
            },
            "sourceLang" => match field.text().await {
                Ok(text) => source_lang = Some(text),
                Err(e) => return AppError::validation(e.to_string()).into_response(),
            },
            "targetLang" => match field.text().await {
                Ok(text) => target_lang = Some(text),
                Err(e) => return AppError::validation(e.to_string()).into_response(),
            },
            _ => {}
        }
    }

    let (Some(source_lang), Some(target_lang)) = (source_lang, target_lang) else {
        return AppError::validation("sourceLang and targetLang are required").into_response();
    };

    match QueueService::submit(state, files, glossary, source_lang, target_lang, rejected).await {
        Ok(res) => ApiSuccess(
            ApiResponse::success(res, "Job submitted to the translation queue"),
            StatusCode::ACCEPTED,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Poll the state of a submitted job
#[utoipa::path(
    get,
    path = "/api/queue/status/{job_id}",
    params(("job_id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job record", body = ApiResponse<JobStatusResponse>),
        (status = 404, description = "Unknown or expired job")
    ),
    tag = "Queue"
)]
pub async fn status(State(state): State<AppState>, Path(job_id): Path<Uuid>) -> impl IntoResponse {
    match QueueService::status(state, job_id).await {
        Ok(res) => ApiSuccess(
            ApiResponse::success(res, "Job status retrieved"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Download one translated output of a completed job
#[utoipa::path(
    get,
    path = "/api/queue/download/{job_id}/{file_index}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID"),
        ("file_index" = usize, Path, description = "Output index within the job")
    ),
    responses(
        (status = 200, description = "Translated document bytes"),
        (status = 400, description = "Job not completed"),
        (status = 404, description = "Unknown or expired job, or no such output")
    ),
    tag = "Queue"
)]
pub async fn download(
    State(state): State<AppState>,
    Path((job_id, file_index)): Path<(Uuid, usize)>,
) -> impl IntoResponse {
    match QueueService::download(state, job_id, file_index).await {
        Ok((file_name, content_type, bytes)) => (
            [
                (header::CONTENT_TYPE, content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{file_name}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Queue occupancy by job status
#[utoipa::path(
    get,
    path = "/api/queue/stats",
    responses(
        (status = 200, description = "Queue statistics", body = ApiResponse<QueueStats>)
    ),
    tag = "Queue"
)]
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    let stats = QueueService::stats(state).await;
    ApiSuccess(
        ApiResponse::success(stats, "Queue statistics retrieved"),
        StatusCode::OK,
    )
    .into_response()
}
