//! HTTP client for the quote endpoint.

use crate::error::Error;
use reqwest::{Client, StatusCode, Url};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

#[cfg(test)]
mod tests;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the quote server (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Total deadline for one call, body included.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_millis(300),
        }
    }
}

/// How a [`QuoteClient::fetch_and_save`] call ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOutcome {
    /// The bid was received and written to the output file.
    Saved {
        /// Response body as received.
        bid: String,
    },
    /// The deadline passed; nothing was written.
    TimedOut,
}

/// Formats the line written to the output file.
#[must_use]
pub fn format_quote_line(bid: &str) -> String {
    format!("Dolar: {}", bid)
}

/// HTTP client for `GET /cotacao`.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    client: Client,
    endpoint: Url,
}

impl QuoteClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let endpoint = Url::parse(&format!(
            "{}/cotacao",
            config.base_url.trim_end_matches('/')
        ))?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, endpoint })
    }

    /// Creates a new client with the default deadline.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// The URL this client calls.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the current bid.
    ///
    /// # Errors
    /// Returns [`Error::Timeout`] when the deadline passes,
    /// [`Error::Api`] with the response body for any non-200 status, and
    /// [`Error::Http`] for other transport failures.
    pub async fn get_quote(&self) -> Result<String, Error> {
        let resp = self.client.get(self.endpoint.clone()).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status != StatusCode::OK {
            return Err(Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        info!("request made successfully");
        Ok(body)
    }

    /// Fetches the current bid and writes `Dolar: <bid>` to `path`,
    /// replacing any previous content.
    ///
    /// A deadline miss is logged and reported as
    /// [`ClientOutcome::TimedOut`]; the file is left untouched.
    ///
    /// # Errors
    /// Returns every failure other than the deadline, including failing to
    /// write the file.
    pub async fn fetch_and_save<P: AsRef<Path>>(&self, path: P) -> Result<ClientOutcome, Error> {
        let bid = match self.get_quote().await {
            Ok(bid) => bid,
            Err(Error::Timeout) => {
                warn!(url = %self.endpoint, "request timed out, insufficient time to make request");
                return Ok(ClientOutcome::TimedOut);
            }
            Err(e) => return Err(e),
        };

        let path = path.as_ref();
        tokio::fs::write(path, format_quote_line(&bid))
            .await
            .map_err(|source| Error::Io {
                path: path.display().to_string(),
                source,
            })?;

        info!(path = %path.display(), "response saved");
        Ok(ClientOutcome::Saved { bid })
    }
}
