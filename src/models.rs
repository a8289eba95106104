//! Quote records and the upstream/API response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use utoipa::ToSchema;

/// One exchange-rate observation as delivered by the upstream price API.
///
/// Every value is kept as the text the upstream sent. All fields are
/// required; a payload missing any of them fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PriceQuote {
    /// Base currency code (e.g., "USD").
    pub code: String,
    /// Counter currency code (e.g., "BRL").
    pub codein: String,
    /// Display name (e.g., "Dólar Americano/Real Brasileiro").
    pub name: String,
    /// Session high.
    pub high: String,
    /// Session low.
    pub low: String,
    /// Absolute bid variation.
    #[serde(rename = "varBid")]
    pub var_bid: String,
    /// Percent change.
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    /// Bid price.
    pub bid: String,
    /// Ask price.
    pub ask: String,
    /// Observation timestamp (unix seconds, as text).
    pub timestamp: String,
    /// Upstream creation date string.
    pub create_date: String,
}

/// A quote that has been written to the local store.
///
/// Only the store constructs this, so an id exists only after a
/// successful insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct StoredQuote {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Local insertion time.
    pub created_at: DateTime<Utc>,
    /// The persisted observation.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub quote: PriceQuote,
}

/// Upstream response body: one quote keyed by the currency pair without
/// its dash (`USD-BRL` is delivered under `"USDBRL"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ApiEnvelope {
    quotes: HashMap<String, PriceQuote>,
}

impl ApiEnvelope {
    /// Returns the key the upstream uses for `pair`.
    #[must_use]
    pub fn key_for(pair: &str) -> String {
        pair.replace('-', "")
    }

    /// Takes the quote for `pair` out of the envelope.
    #[must_use]
    pub fn into_quote(mut self, pair: &str) -> Option<PriceQuote> {
        self.quotes.remove(&Self::key_for(pair))
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
