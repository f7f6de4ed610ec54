//! Router configuration for the web server.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use reviewdeck_client::Transport;
use tower_http::trace::TraceLayer;

use super::AppState;
use super::handlers;

/// Uploaded PDFs and CSVs can exceed axum's 2 MB default
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Create the main router with all routes.
pub fn create_router<T: Transport + 'static>(state: Arc<AppState<T>>) -> Router {
    Router::new()
        .route("/", get(handlers::index::<T>))
        .route("/set_api_keys", post(handlers::set_api_keys::<T>))
        // Form endpoints
        .route(
            "/transform_submission",
            post(handlers::transform_submission::<T>),
        )
        .route(
            "/transform_checklist",
            post(handlers::transform_checklist::<T>),
        )
        .route("/run_review", post(handlers::run_review::<T>))
        // JSON API
        .route("/api/models", get(handlers::list_models::<T>))
        .route("/api/self_test", post(handlers::self_test::<T>))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
