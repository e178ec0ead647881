pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/documents",
            post(handlers::handle_upload_documents),
        )
        .route(
            "/api/v1/sessions/:id/analyze",
            post(handlers::handle_analyze),
        )
        .route(
            "/api/v1/sessions/:id/suggestions",
            post(handlers::handle_suggestions),
        )
        .route(
            "/api/v1/sessions/:id/comparison",
            post(handlers::handle_comparison),
        )
        .route("/api/v1/sessions/:id/reset", post(handlers::handle_reset))
        .with_state(state)
}
