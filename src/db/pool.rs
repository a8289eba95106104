//! Database connection pool management.

use crate::db::StoreError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Opens the SQLite database, creating the file if it does not exist.
    ///
    /// # Arguments
    /// * `database_url` - SQLite connection string (e.g., `sqlite://cotacao.db`)
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        info!(url = database_url, "Database connection pool established");

        Ok(Self { pool })
    }

    /// Opens the database and makes sure the schema exists.
    ///
    /// # Errors
    /// Returns an error if the connection or the migrations fail.
    pub async fn open(database_url: &str) -> Result<Self, StoreError> {
        let db = Self::new(database_url).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs database migrations.
    ///
    /// # Errors
    /// Returns an error if migrations fail.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Closes every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
