use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::json;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower_http::cors::{Any, CorsLayer};

use crate::common::upload::ACCEPTED_EXTENSIONS;
use crate::docs::ApiDoc;
use crate::state::AppState;

pub fn configure_routes(state: &AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // A submission can carry several files; the per-file cap is enforced
    // while reading the multipart stream.
    let body_limit = (state.config.max_upload_bytes() as usize).saturating_mul(4);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", axum::routing::get(health))
        .nest("/api/queue", crate::modules::queue::router())
        .nest("/api/text", crate::modules::text::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
}

/// Liveness probe and capability summary
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "supported_formats": ACCEPTED_EXTENSIONS,
            "max_upload_mb": state.config.max_upload_mb,
        })),
    )
}
