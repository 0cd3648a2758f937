use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub async fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes(&state)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
