//! Cotação runner
//!
//! Starts the quote server, runs the client once and shuts the server down.

use cotacao_backend::config::Config;
use cotacao_backend::orchestrator;
use cotacao_client::ClientOutcome;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from COTACAO_CONFIG or use defaults
    let mut config = match std::env::var("COTACAO_CONFIG") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            Config::load(&path)?
        }
        Err(_) => Config::default(),
    };
    config.apply_env_overrides()?;

    info!(
        "Starting Cotação on {} (upstream {})",
        config.server.bind_addr(),
        config.upstream.quote_url()
    );

    match orchestrator::run(&config).await? {
        ClientOutcome::Saved { bid } => info!("Dolar: {}", bid),
        ClientOutcome::TimedOut => info!("No quote saved, client deadline exceeded"),
    }

    Ok(())
}
