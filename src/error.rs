//! Error types for the quote endpoint.

use crate::db::StoreError;
use crate::fetcher::FetchError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};


/// API error types.
///
/// Every variant maps to HTTP 500 with the error text as a plain-text body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Fetching the upstream quote failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Persisting the quote failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Short machine-readable code for logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Fetch(FetchError::Timeout) => "UPSTREAM_TIMEOUT",
            ApiError::Fetch(FetchError::Upstream { .. }) => "UPSTREAM_STATUS",
            ApiError::Fetch(FetchError::Decode(_) | FetchError::MissingPair(_)) => {
                "UPSTREAM_PAYLOAD"
            }
            ApiError::Fetch(FetchError::Transport(_)) => "UPSTREAM_TRANSPORT",
            ApiError::Store(StoreError::Timeout) => "DATABASE_TIMEOUT",
            ApiError::Store(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
