//! Database module for SQLite connection and quote persistence.

mod error;
mod pool;
mod store;

pub use error::StoreError;
pub use pool::DatabasePool;
pub use store::QuoteStore;
