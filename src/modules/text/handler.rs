use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use super::dto::{HistoryResponse, SessionResponse, TranslateTextRequest, TranslateTextResponse};
use super::service::TextService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::state::AppState;

/// Create a translation session
#[utoipa::path(
    post,
    path = "/api/text/sessions",
    responses(
        (status = 201, description = "Session created", body = ApiResponse<SessionResponse>)
    ),
    tag = "Text"
)]
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let res = TextService::create_session(state).await;
    ApiSuccess(
        ApiResponse::success(res, "Session created"),
        StatusCode::CREATED,
    )
    .into_response()
}

/// Translate a short text within a session
#[utoipa::path(
    post,
    path = "/api/text/translate",
    request_body = TranslateTextRequest,
    responses(
        (status = 200, description = "Translated text", body = ApiResponse<TranslateTextResponse>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown session"),
        (status = 502, description = "Provider failure")
    ),
    tag = "Text"
)]
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateTextRequest>,
) -> impl IntoResponse {
    match TextService::translate(state, req).await {
        Ok(res) => ApiSuccess(
            ApiResponse::success(res, "Text translated"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Session history, newest first
#[utoipa::path(
    get,
    path = "/api/text/sessions/{session_id}/history",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Recent translations", body = ApiResponse<HistoryResponse>),
        (status = 404, description = "Unknown session")
    ),
    tag = "Text"
)]
pub async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    match TextService::history(state, session_id).await {
        Ok(res) => ApiSuccess(
            ApiResponse::success(res, "History retrieved"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Clear a session's history
#[utoipa::path(
    delete,
    path = "/api/text/sessions/{session_id}/history",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "History cleared"),
        (status = 404, description = "Unknown session")
    ),
    tag = "Text"
)]
pub async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    match TextService::clear_history(state, session_id).await {
        Ok(()) => ApiSuccess(
            ApiResponse::success((), "History cleared"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}
