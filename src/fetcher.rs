//! Upstream price fetcher.
//!
//! Issues one GET per call to the price API and decodes the
//! [`ApiEnvelope`] into a [`PriceQuote`]. The whole exchange, body
//! included, must finish before the caller's deadline.

use crate::config::UpstreamConfig;
use crate::models::{ApiEnvelope, PriceQuote};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, warn};


/// Fetcher error types.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The deadline passed before the response was complete.
    #[error("request timed out")]
    Timeout,

    /// The upstream answered with a non-200 status; the text is its body.
    ///
    /// The body is taken as raw bytes, ignoring any declared charset.
    #[error("{body}")]
    Upstream {
        /// HTTP status returned by the upstream.
        status: StatusCode,
        /// Response body, verbatim when it is UTF-8.
        body: String,
    },

    /// The payload was not a valid envelope.
    #[error("failed to decode upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope did not contain the requested pair.
    #[error("upstream payload has no quote for {0}")]
    MissingPair(String),

    /// Connection or protocol failure.
    #[error("{0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err)
        }
    }
}

/// Fetches the latest quote for one currency pair.
#[derive(Debug, Clone)]
pub struct PriceFetcher {
    client: Client,
    url: String,
    pair: String,
}

impl PriceFetcher {
    /// Creates a fetcher for the configured upstream.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            url: config.quote_url(),
            pair: config.pair.clone(),
        })
    }

    /// Endpoint this fetcher calls.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the current quote, giving up at `deadline`.
    ///
    /// # Errors
    /// Returns [`FetchError::Timeout`] if the deadline is already past or
    /// passes before the body is read, and the other variants for non-200
    /// answers, bad payloads and transport failures.
    pub async fn fetch(&self, deadline: Instant) -> Result<PriceQuote, FetchError> {
        if Instant::now() >= deadline {
            warn!("request timed out, insufficient time to make request");
            return Err(FetchError::Timeout);
        }

        match tokio::time::timeout_at(deadline, self.fetch_unbounded()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(url = %self.url, "request timed out, insufficient time to make request");
                Err(FetchError::Timeout)
            }
        }
    }

    async fn fetch_unbounded(&self) -> Result<PriceQuote, FetchError> {
        debug!(url = %self.url, "fetching upstream quote");
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();

        if status != StatusCode::OK {
            let bytes = resp.bytes().await?;
            return Err(FetchError::Upstream {
                status,
                body: body_text(&bytes),
            });
        }

        let bytes = resp.bytes().await?;
        let envelope: ApiEnvelope = serde_json::from_slice(&bytes)?;
        envelope
            .into_quote(&self.pair)
            .ok_or_else(|| FetchError::MissingPair(ApiEnvelope::key_for(&self.pair)))
    }
}

/// Upstream body as text. Bytes are kept as sent; only invalid UTF-8
/// sequences are replaced with U+FFFD.
fn body_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
