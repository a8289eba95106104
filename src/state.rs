//! Application state management.

use crate::config::Config;
use crate::db::QuoteStore;
use crate::fetcher::PriceFetcher;
use std::time::Duration;

/// Per-stage deadlines applied to every `/cotacao` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimeouts {
    /// Bound on the upstream fetch.
    pub fetch: Duration,
    /// Bound on the database insert.
    pub store: Duration,
}

impl StageTimeouts {
    /// Reads the stage bounds from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            fetch: config.upstream.timeout(),
            store: config.database.timeout(),
        }
    }
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream price fetcher.
    pub fetcher: PriceFetcher,
    /// Quote store.
    pub store: QuoteStore,
    /// Stage deadlines.
    pub timeouts: StageTimeouts,
}

impl AppState {
    /// Creates the application state.
    #[must_use]
    pub fn new(fetcher: PriceFetcher, store: QuoteStore, timeouts: StageTimeouts) -> Self {
        Self {
            fetcher,
            store,
            timeouts,
        }
    }
}
