//! Configuration module for loading and parsing TOML configuration files.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Quote server configuration.
    pub server: ServerConfig,
    /// Upstream price API configuration.
    pub upstream: UpstreamConfig,
    /// Local store configuration.
    pub database: DatabaseConfig,
    /// Quote client configuration.
    pub client: ClientSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
    /// How long shutdown waits for in-flight requests, in milliseconds.
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_ms: 5_000,
        }
    }
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Graceful shutdown bound.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

/// Upstream price API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the price API.
    pub base_url: String,
    /// Currency pair, dash separated (e.g., "USD-BRL").
    pub pair: String,
    /// Deadline for one fetch, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://economia.awesomeapi.com.br".to_string(),
            pair: "USD-BRL".to_string(),
            timeout_ms: 200,
        }
    }
}

impl UpstreamConfig {
    /// Full URL of the latest-quote endpoint for the configured pair.
    #[must_use]
    pub fn quote_url(&self) -> String {
        format!(
            "{}/json/last/{}",
            self.base_url.trim_end_matches('/'),
            self.pair
        )
    }

    /// Fetch deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Local store configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection string.
    pub url: String,
    /// Deadline for one insert, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://cotacao.db".to_string(),
            timeout_ms: 10,
        }
    }
}

impl DatabaseConfig {
    /// Insert deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Quote client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Total deadline for the call to `/cotacao`, in milliseconds.
    pub timeout_ms: u64,
    /// File the quote is written to.
    pub output_path: PathBuf,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 300,
            output_path: PathBuf::from("cotacao.txt"),
        }
    }
}

impl ClientSettings {
    /// Client deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides values from `HOST`, `PORT` and `DATABASE_URL`.
    ///
    /// # Errors
    /// Returns error if `PORT` is not a valid port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                ConfigError::InvalidValue(format!("PORT must be a valid number: {port}"))
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        self.validate()
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.base_url.is_empty() {
            return Err(ConfigError::InvalidValue(
                "upstream base_url cannot be empty".to_string(),
            ));
        }
        if !self.upstream.pair.contains('-') {
            return Err(ConfigError::InvalidValue(format!(
                "upstream pair must look like BASE-QUOTE, got {:?}",
                self.upstream.pair
            )));
        }
        if self.database.url.is_empty() {
            return Err(ConfigError::InvalidValue(
                "database url cannot be empty".to_string(),
            ));
        }

        let timeouts = [
            ("upstream timeout_ms", self.upstream.timeout_ms),
            ("database timeout_ms", self.database.timeout_ms),
            ("client timeout_ms", self.client.timeout_ms),
            ("server shutdown_timeout_ms", self.server.shutdown_timeout_ms),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(ConfigError::InvalidValue(format!(
                    "{name} must be positive"
                )));
            }
        }

        Ok(())
    }
}
