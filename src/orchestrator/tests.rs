//! Unit tests for orchestrator module.

use super::*;
use crate::testing::{spawn_upstream, upstream_body};
use axum::http::StatusCode;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn test_config(dir: &TempDir, upstream: String) -> Config {
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

// ============================================================================
// client_base_url Tests
// ============================================================================

#[test]
fn test_client_base_url_wildcard_v4() {
    let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
    assert_eq!(client_base_url(addr), "http://127.0.0.1:8080");
}

#[test]
fn test_client_base_url_wildcard_v6() {
    let addr: SocketAddr = "[::]:8080".parse().unwrap();
    assert_eq!(client_base_url(addr), "http://[::1]:8080");
}

#[test]
fn test_client_base_url_specific() {
    let addr: SocketAddr = "192.168.1.10:3000".parse().unwrap();
    assert_eq!(client_base_url(addr), "http://192.168.1.10:3000");
}

// ============================================================================
// run Tests
// ============================================================================

#[tokio::test]
async fn test_run_writes_quote_file() {
    let upstream = spawn_upstream(StatusCode::OK, upstream_body("5.25"), Duration::ZERO).await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir, upstream);

    let outcome = run(&config).await.unwrap();

    assert_eq!(
        outcome,
        ClientOutcome::Saved {
            bid: "5.25".to_string()
        }
    );
    let written = std::fs::read_to_string(&config.client.output_path).unwrap();
    assert_eq!(written, "Dolar: 5.25");
}

#[tokio::test]
async fn test_run_client_timeout_is_not_an_error() {
    let upstream = spawn_upstream(
        StatusCode::OK,
        upstream_body("5.25"),
        Duration::from_millis(300),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir, upstream);
    config.client.timeout_ms = 50;

    let started = Instant::now();
    let outcome = run(&config).await.unwrap();

    assert_eq!(outcome, ClientOutcome::TimedOut);
    assert!(!config.client.output_path.exists());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_run_server_error_is_fatal() {
    let upstream = spawn_upstream(
        StatusCode::SERVICE_UNAVAILABLE,
        "service unavailable".to_string(),
        Duration::ZERO,
    )
    .await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir, upstream);

    let error = run(&config).await.unwrap_err();
    match error {
        RunError::Client(cotacao_client::Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "service unavailable");
        }
        other => panic!("expected client API error, got {other:?}"),
    }
    assert!(!config.client.output_path.exists());
}

#[tokio::test]
async fn test_run_bad_database_is_setup_error() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir, "http://127.0.0.1:9".to_string());
    config.database.url = format!(
        "sqlite://{}",
        dir.path().join("no-such-dir").join("cotacao.db").display()
    );

    let error = run(&config).await.unwrap_err();
    assert!(matches!(error, RunError::Store(_)));
}
