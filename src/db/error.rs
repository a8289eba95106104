//! Store error types.

use thiserror::Error;

/// Store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The deadline passed before the statement completed.
    #[error("database operation timed out")]
    Timeout,

    /// Any other database failure, reported as the driver describes it.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Schema creation failed.
    #[error("failed to migrate database: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Whether this error came from an exceeded deadline.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, StoreError::Timeout)
    }
}
