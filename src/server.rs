//! Quote server lifecycle.
//!
//! The server is bound first, then spawned onto its own task together with
//! a shutdown signal. [`RunningServer::wait_for_shutdown`] is the waiter
//! the orchestrator awaits: it blocks until the signal fires, then gives
//! in-flight requests a bounded grace period before the listener goes away.

use axum::Router;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};

/// Server error types.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The serve loop failed.
    #[error("server exited: {0}")]
    Serve(#[from] io::Error),

    /// The serve task panicked or was cancelled.
    #[error("server task failed: {0}")]
    Join(#[from] JoinError),

    /// In-flight requests did not finish within the grace period.
    #[error("graceful shutdown did not finish within {0:?}")]
    ShutdownTimeout(Duration),
}

/// A bound, not yet serving, quote server.
pub struct QuoteServer {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl QuoteServer {
    /// Binds `addr` for `router`.
    ///
    /// # Errors
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub async fn bind(addr: &str, router: Router) -> Result<Self, ServerError> {
        let bind_err = |source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        };
        let listener = TcpListener::bind(addr).await.map_err(bind_err)?;
        let local_addr = listener.local_addr().map_err(bind_err)?;

        Ok(Self {
            listener,
            router,
            local_addr,
        })
    }

    /// Address the listener is bound to.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Starts serving on a background task.
    ///
    /// The server stops accepting once `shutdown` turns `true` or its
    /// sender is dropped.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> RunningServer {
        let QuoteServer {
            listener,
            router,
            local_addr,
        } = self;

        let mut serve_signal = shutdown.clone();
        let task = tokio::spawn(async move {
            info!("Server running on {}", local_addr);
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { wait_for_signal(&mut serve_signal).await })
                .await
        });

        RunningServer {
            local_addr,
            shutdown,
            task,
        }
    }
}

/// A server running on a background task.
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: watch::Receiver<bool>,
    task: JoinHandle<io::Result<()>>,
}

impl RunningServer {
    /// Address the listener is bound to.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits for the shutdown signal, then for the server to drain.
    ///
    /// # Errors
    /// Returns [`ServerError::ShutdownTimeout`] if in-flight requests are
    /// still running after `grace`; the serve task is aborted in that case.
    pub async fn wait_for_shutdown(self, grace: Duration) -> Result<(), ServerError> {
        let RunningServer {
            mut shutdown,
            mut task,
            ..
        } = self;

        wait_for_signal(&mut shutdown).await;
        info!(grace = ?grace, "Shutting down server");

        match tokio::time::timeout(grace, &mut task).await {
            Ok(joined) => {
                joined??;
                info!("server shutdown");
                Ok(())
            }
            Err(_) => {
                warn!("in-flight requests still running after {:?}, aborting", grace);
                task.abort();
                Err(ServerError::ShutdownTimeout(grace))
            }
        }
    }
}

/// Resolves once the flag is `true`. A dropped sender counts as a request
/// to stop.
async fn wait_for_signal(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
