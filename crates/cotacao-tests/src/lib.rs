//! Shared helpers for the end-to-end tests.
//!
//! Every scenario runs against in-process servers on ephemeral loopback
//! ports: a fake upstream price API and, where needed, the real quote
//! server backed by a temporary SQLite file.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use cotacao_backend::api::create_router;
use cotacao_backend::config::Config;
use cotacao_backend::orchestrator::{build_state, client_base_url};
use cotacao_backend::server::{QuoteServer, RunningServer};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Builds an upstream body carrying `bid`.
#[must_use]
pub fn upstream_body(bid: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.2803","low":"5.2207","varBid":"0.0241","pctChange":"0.46","bid":"{}","ask":"5.2514","timestamp":"1718654398","create_date":"2024-06-17 16:59:58"}}}}"#,
        bid
    )
}

/// Starts a fake price API that answers every `/json/last/{pair}` with
/// `status` and `body` after `delay`. Returns its base URL.
///
/// # Panics
/// Panics if the loopback listener cannot be bound.
pub async fn spawn_upstream(status: StatusCode, body: String, delay: Duration) -> String {
    let app = Router::new().route(
        "/json/last/{pair}",
        get(move || {
            let body = body.clone();
            async move {
                tokio::time::sleep(delay).await;
                (status, body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("fake upstream address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}", addr)
}

/// Configuration pointing at `upstream`, with every file inside `dir`,
/// a loopback ephemeral port and relaxed stage deadlines.
#[must_use]
pub fn test_config(dir: &TempDir, upstream: String) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.upstream.base_url = upstream;
    config.upstream.timeout_ms = 2_000;
    config.database.url = format!("sqlite://{}", dir.path().join("cotacao.db").display());
    config.database.timeout_ms = 2_000;
    config.client.timeout_ms = 5_000;
    config.client.output_path = dir.path().join("cotacao.txt");
    config
}

/// A quote server running in the background for one test.
pub struct TestServer {
    /// Base URL to reach the server.
    pub base_url: String,
    /// Shutdown signal.
    pub shutdown: watch::Sender<bool>,
    /// The running server.
    pub server: RunningServer,
}

/// Starts the real quote server for `config`.
///
/// # Panics
/// Panics if the store cannot be opened or the port cannot be bound.
pub async fn start_server(config: &Config) -> TestServer {
    let (shutdown, rx) = watch::channel(false);
    let state = build_state(config).await.expect("build state");
    let server = QuoteServer::bind(&config.server.bind_addr(), create_router(state))
        .await
        .expect("bind quote server")
        .spawn(rx);

    TestServer {
        base_url: client_base_url(server.local_addr()),
        shutdown,
        server,
    }
}
