pub mod analyze;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Application routes without transport layers; `main` adds CORS, tracing and body limits.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/analyze",
            post(analyze::analyze).fallback(analyze::method_not_allowed),
        )
        .with_state(state)
}
