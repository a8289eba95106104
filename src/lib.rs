//! # Cotação Backend
//!
//! Fetches the latest USD-BRL quote from
//! [AwesomeAPI](https://economia.awesomeapi.com.br), stores it in SQLite and
//! serves the bid over HTTP. A companion client calls the endpoint once and
//! writes the result to `cotacao.txt`.
//!
//! ## Deadlines
//!
//! Three independent deadlines, each derived when its stage starts:
//!
//! | Stage | Default | Config key |
//! |-------|---------|------------|
//! | Upstream fetch | 200 ms | `upstream.timeout_ms` |
//! | Database insert | 10 ms | `database.timeout_ms` |
//! | Client call to `/cotacao` | 300 ms | `client.timeout_ms` |
//!
//! Shutdown waits up to `server.shutdown_timeout_ms` (5 s) for in-flight
//! requests.
//!
//! ## Flow
//!
//! ```text
//! main → orchestrator::run
//!          ├── QuoteServer::spawn ──────────────┐
//!          ├── QuoteClient::fetch_and_save      │ GET /cotacao
//!          │                                    ├── PriceFetcher::fetch
//!          │                                    └── QuoteStore::insert
//!          ├── shutdown signal
//!          └── RunningServer::wait_for_shutdown
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers, router and OpenAPI document |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`db`] | SQLite pool, migrations and the quote store |
//! | [`error`] | API error type with `IntoResponse` implementation |
//! | [`fetcher`] | Upstream price fetcher |
//! | [`models`] | Quote records and response shapes |
//! | [`orchestrator`] | Serve, run the client once, shut down |
//! | [`server`] | Server bind, spawn and graceful shutdown |
//! | [`state`] | Application state |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/cotacao` | Fetch, store and return the current bid (plain text) |
//! | GET | `/health` | Health check |
//! | GET | `/api-docs/openapi.json` | OpenAPI document |
//!
//! ## Example Usage
//!
//! ```bash
//! # Default configuration
//! cargo run
//!
//! # With a config file and a different port
//! COTACAO_CONFIG=cotacao.toml PORT=3000 cargo run
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod orchestrator;
pub mod server;
pub mod state;

#[cfg(test)]
mod testing;
