//! HTTP client for the Cotação quote endpoint.
//!
//! Calls `GET /cotacao` once under a total deadline and writes the answer
//! to a local file as `Dolar: <bid>`. A deadline miss is reported as
//! [`ClientOutcome::TimedOut`] instead of an error, every other failure is
//! an [`Error`] for the caller to treat as fatal.
//!
//! # Example
//!
//! ```no_run
//! use cotacao_client::{ClientConfig, ClientOutcome, QuoteClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cotacao_client::Error> {
//!     let client = QuoteClient::new(ClientConfig {
//!         base_url: "http://localhost:8080".into(),
//!         timeout: Duration::from_millis(300),
//!     })?;
//!
//!     match client.fetch_and_save("cotacao.txt").await? {
//!         ClientOutcome::Saved { bid } => println!("Dolar: {}", bid),
//!         ClientOutcome::TimedOut => println!("server too slow"),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;

pub use client::{ClientConfig, ClientOutcome, QuoteClient, format_quote_line};
pub use error::Error;
