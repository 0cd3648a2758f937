use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod service;
pub mod session;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(handler::create_session))
        .route("/translate", post(handler::translate))
        .route(
            "/sessions/{session_id}/history",
            get(handler::history).delete(handler::clear_history),
        )
}
