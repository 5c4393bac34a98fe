pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::extract::handlers as extract_handlers;
use crate::optimize::handlers as optimize_handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

/// Uploads are capped at 10MB; the body limit leaves headroom for multipart framing.
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // File extraction
        .route(
            "/api/v1/files/extract",
            post(extract_handlers::handle_extract),
        )
        // Editor sessions
        .route(
            "/api/v1/sessions",
            post(session_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(session_handlers::handle_get_session),
        )
        .route(
            "/api/v1/sessions/:id/text",
            put(session_handlers::handle_set_text),
        )
        .route(
            "/api/v1/sessions/:id/mode",
            put(session_handlers::handle_set_mode),
        )
        // Optimization
        .route(
            "/api/v1/sessions/:id/optimize",
            post(optimize_handlers::handle_optimize),
        )
        // Export
        .route(
            "/api/v1/sessions/:id/export",
            post(export_handlers::handle_export),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
