//! Helpers shared by unit tests.

use crate::config::UpstreamConfig;
use crate::models::PriceQuote;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use std::time::Duration;
use tokio::net::TcpListener;

pub(crate) fn upstream_body(bid: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.2803","low":"5.2207","varBid":"0.0241","pctChange":"0.46","bid":"{bid}","ask":"5.2514","timestamp":"1718654398","create_date":"2024-06-17 16:59:58"}}}}"#
    )
}

pub(crate) fn sample_quote(bid: &str) -> PriceQuote {
    PriceQuote {
        code: "USD".to_string(),
        codein: "BRL".to_string(),
        name: "Dólar Americano/Real Brasileiro".to_string(),
        high: "5.2803".to_string(),
        low: "5.2207".to_string(),
        var_bid: "0.0241".to_string(),
        pct_change: "0.46".to_string(),
        bid: bid.to_string(),
        ask: "5.2514".to_string(),
        timestamp: "1718654398".to_string(),
        create_date: "2024-06-17 16:59:58".to_string(),
    }
}

/// Serves `body` with `status` on `/json/last/{pair}` after `delay`.
pub(crate) async fn spawn_upstream(status: StatusCode, body: String, delay: Duration) -> String {
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

    spawn_router(app).await
}

/// Serves `app` on an ephemeral loopback port and returns its base URL.
pub(crate) async fn spawn_router(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub(crate) fn upstream_config(base_url: String) -> UpstreamConfig {
    UpstreamConfig {
        base_url,
        ..Default::default()
    }
}
