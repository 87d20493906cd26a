//! Route configuration.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/sync", post(handlers::sync::sync))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
