//! Process orchestration: serve, run the client once, shut down.

use crate::api::create_router;
use crate::config::Config;
use crate::db::{DatabasePool, QuoteStore, StoreError};
use crate::fetcher::{FetchError, PriceFetcher};
use crate::server::{QuoteServer, ServerError};
use crate::state::{AppState, StageTimeouts};
use cotacao_client::{ClientConfig, ClientOutcome, QuoteClient};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};

#[cfg(test)]
mod tests;

/// Orchestration error types.
#[derive(Debug, Error)]
pub enum RunError {
    /// The store could not be opened or migrated.
    #[error("failed to set up database: {0}")]
    Store(#[from] StoreError),

    /// The upstream HTTP client could not be built.
    #[error("failed to set up upstream client: {0}")]
    Fetcher(#[from] FetchError),

    /// Binding, serving or shutting down failed.
    #[error(transparent)]
    Server(#[from] ServerError),

    /// The quote client failed.
    #[error("client failed: {0}")]
    Client(#[from] cotacao_client::Error),

    /// The shutdown waiter task panicked.
    #[error("shutdown waiter failed: {0}")]
    Waiter(#[from] tokio::task::JoinError),
}

/// Builds the shared state from configuration, opening the store.
///
/// # Errors
/// Returns an error if the store or the upstream client cannot be set up.
pub async fn build_state(config: &Config) -> Result<Arc<AppState>, RunError> {
    let db = DatabasePool::open(&config.database.url).await?;
    let fetcher = PriceFetcher::new(&config.upstream)?;

    Ok(Arc::new(AppState::new(
        fetcher,
        QuoteStore::new(db),
        StageTimeouts::from_config(config),
    )))
}

/// Runs the whole sequence once.
///
/// 1. open the store and bind the server;
/// 2. spawn the server and its shutdown waiter;
/// 3. run the client against the bound address;
/// 4. signal shutdown and wait for the waiter.
///
/// A client failure is returned only after the server has shut down.
///
/// # Errors
/// Returns setup failures immediately, and client or shutdown failures
/// after the shutdown sequence.
pub async fn run(config: &Config) -> Result<ClientOutcome, RunError> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let state = build_state(config).await?;
    let server = QuoteServer::bind(&config.server.bind_addr(), create_router(state))
        .await?
        .spawn(shutdown_rx);
    let client_base = client_base_url(server.local_addr());

    let waiter = tokio::spawn(server.wait_for_shutdown(config.server.shutdown_timeout()));
    info!("Server initialized");

    let client = QuoteClient::new(ClientConfig {
        base_url: client_base,
        timeout: config.client.timeout(),
    });
    let outcome = match client {
        Ok(client) => client.fetch_and_save(&config.client.output_path).await,
        Err(e) => Err(e),
    };
    info!("Client done");

    info!("Waiting for server to close...");
    // The waiter holds a receiver, so the send cannot fail.
    let _ = shutdown_tx.send(true);
    let shutdown = waiter.await;

    let outcome = outcome.inspect_err(|e| error!("client failed: {}", e))?;
    shutdown??;
    info!("Server closed, exiting...");

    Ok(outcome)
}

/// Base URL the client should dial to reach a server bound on `addr`.
///
/// Wildcard binds are reached over loopback.
#[must_use]
pub fn client_base_url(addr: SocketAddr) -> String {
    let ip = match addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    format!("http://{}", SocketAddr::new(ip, addr.port()))
}
