//! Health check endpoints.

use crate::state::AppState;
use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

/// Registers health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Liveness only: answers 200 `OK` without looking at the updater.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
