//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Slack above the acceptance byte ceiling so an oversized upload
/// reaches the pipeline and gets the documented rejection instead of a
/// framework-level 413 with a different body shape.
const BODY_LIMIT_SLACK_BYTES: usize = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_image_size_bytes as usize + BODY_LIMIT_SLACK_BYTES;

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/test-strips/upload", post(handlers::upload::upload_test_strip))
        .route("/api/test-strips", get(handlers::list::list_test_strips))
        .route("/api/test-strips/history", get(handlers::history::test_strip_history))
        .route(
            "/api/test-strips/uploads/{filename}",
            get(handlers::image_file::serve_image),
        )
        .route("/api/test-strips/{id}", get(handlers::get_by_id::get_test_strip))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
