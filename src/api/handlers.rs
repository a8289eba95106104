//! API request handlers.

use crate::error::ApiError;
use crate::models::HealthResponse;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{info, warn};


// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Quote
// ============================================================================

/// Fetches the latest quote, stores it and returns the bid as plain text.
///
/// The fetch and the insert each get their own deadline, measured from the
/// moment the stage starts.
#[utoipa::path(
    get,
    path = "/cotacao",
    responses(
        (status = 200, description = "Current bid", body = String, content_type = "text/plain"),
        (status = 500, description = "Fetch or store failure", body = String, content_type = "text/plain")
    ),
    tag = "Quotes"
)]
pub async fn get_cotacao(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    let result = fetch_and_store(&state).await;
    if let Err(ref e) = result {
        warn!(code = e.code(), error = %e, "quote request failed");
    }
    result
}

async fn fetch_and_store(state: &AppState) -> Result<String, ApiError> {
    let quote = state
        .fetcher
        .fetch(Instant::now() + state.timeouts.fetch)
        .await?;

    let stored = state
        .store
        .insert(&quote, Instant::now() + state.timeouts.store)
        .await?;

    info!(id = stored.id, bid = %stored.quote.bid, "quote stored");
    Ok(stored.quote.bid)
}
