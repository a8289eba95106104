//! Route configuration.

use crate::api::{docs, handlers};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Creates the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Quote
        .route("/cotacao", get(handlers::get_cotacao))
        // OpenAPI document
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
