use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod service;
pub mod store;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(handler::submit))
        .route("/status/{job_id}", get(handler::status))
        .route("/download/{job_id}/{file_index}", get(handler::download))
        .route("/stats", get(handler::stats))
}
