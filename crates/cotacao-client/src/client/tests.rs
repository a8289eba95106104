//! Unit tests for client module.

use super::*;
use axum::Router;
use axum::http::StatusCode as AxumStatus;
use axum::routing::get;
use tempfile::TempDir;
use tokio::net::TcpListener;

async fn spawn_server(status: AxumStatus, body: &'static str, delay: Duration) -> String {
    let app = Router::new().route(
        "/cotacao",
        get(move || async move {
            tokio::time::sleep(delay).await;
            (status, body)
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn client_for(base_url: String, timeout: Duration) -> QuoteClient {
    QuoteClient::new(ClientConfig { base_url, timeout }).unwrap()
}

// ============================================================================
// ClientConfig Tests
// ============================================================================

#[test]
fn test_client_config_default() {
    let config = ClientConfig::default();

    assert_eq!(config.base_url, "http://localhost:8080");
    assert_eq!(config.timeout, Duration::from_millis(300));
}

#[test]
fn test_client_config_clone() {
    let config = ClientConfig {
        base_url: "http://test.com".to_string(),
        timeout: Duration::from_secs(10),
    };

    let cloned = config.clone();
    assert_eq!(cloned.base_url, config.base_url);
    assert_eq!(cloned.timeout, config.timeout);
}

// ============================================================================
// QuoteClient Creation Tests
// ============================================================================

#[test]
fn test_quote_client_endpoint() {
    let client = QuoteClient::with_base_url("http://localhost:8080").unwrap();

    assert_eq!(client.endpoint().as_str(), "http://localhost:8080/cotacao");
}

#[test]
fn test_quote_client_base_url_trimmed() {
    let client = QuoteClient::with_base_url("http://localhost:8080/").unwrap();

    assert_eq!(client.endpoint().as_str(), "http://localhost:8080/cotacao");
}

#[test]
fn test_quote_client_invalid_url() {
    let result = QuoteClient::with_base_url("not a url");

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn test_format_quote_line() {
    assert_eq!(format_quote_line("5.25"), "Dolar: 5.25");
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_and_save_writes_file() {
    let base = spawn_server(AxumStatus::OK, "5.25", Duration::ZERO).await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cotacao.txt");
    std::fs::write(&path, "Dolar: stale value from a previous run").unwrap();

    let outcome = client_for(base, Duration::from_secs(2))
        .fetch_and_save(&path)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ClientOutcome::Saved {
            bid: "5.25".to_string()
        }
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Dolar: 5.25");
}

#[tokio::test]
async fn test_non_200_is_api_error() {
    let base = spawn_server(
        AxumStatus::INTERNAL_SERVER_ERROR,
        "service unavailable",
        Duration::ZERO,
    )
    .await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cotacao.txt");

    let error = client_for(base, Duration::from_secs(2))
        .fetch_and_save(&path)
        .await
        .unwrap_err();

    match error {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "service unavailable");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert!(!path.exists());
}

#[tokio::test]
async fn test_deadline_is_soft_failure() {
    let base = spawn_server(AxumStatus::OK, "5.25", Duration::from_millis(500)).await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cotacao.txt");

    let outcome = client_for(base, Duration::from_millis(50))
        .fetch_and_save(&path)
        .await
        .unwrap();

    assert_eq!(outcome, ClientOutcome::TimedOut);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_get_quote_timeout_error() {
    let base = spawn_server(AxumStatus::OK, "5.25", Duration::from_millis(500)).await;

    let error = client_for(base, Duration::from_millis(50))
        .get_quote()
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Timeout));
}

#[tokio::test]
async fn test_connection_refused_is_fatal() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = TempDir::new().unwrap();
    let error = client_for(format!("http://{}", addr), Duration::from_secs(2))
        .fetch_and_save(dir.path().join("cotacao.txt"))
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Http(_)));
}

#[tokio::test]
async fn test_unwritable_path_is_io_error() {
    let base = spawn_server(AxumStatus::OK, "5.25", Duration::ZERO).await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("cotacao.txt");

    let error = client_for(base, Duration::from_secs(2))
        .fetch_and_save(&path)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Io { .. }));
}
