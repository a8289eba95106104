//! Quote persistence.

use crate::db::{DatabasePool, StoreError};
use crate::models::{PriceQuote, StoredQuote};
use chrono::Utc;
use sqlx::{Sqlite, Transaction};
use tokio::time::Instant;
use tracing::{debug, warn};


/// Writes quotes to the `quotes` table.
#[derive(Clone)]
pub struct QuoteStore {
    db: DatabasePool,
}

impl QuoteStore {
    /// Creates a store over an open, migrated pool.
    #[must_use]
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    /// Inserts `quote`, giving up at `deadline`.
    ///
    /// The row is written inside a transaction that is committed only if
    /// the deadline has not passed once the insert returns. On timeout the
    /// transaction is dropped and rolled back, so a reported timeout never
    /// leaves a row behind.
    ///
    /// # Errors
    /// Returns [`StoreError::Timeout`] if the deadline is already past or
    /// passes during the insert, and [`StoreError::Database`] for any other
    /// failure.
    pub async fn insert(
        &self,
        quote: &PriceQuote,
        deadline: Instant,
    ) -> Result<StoredQuote, StoreError> {
        if Instant::now() >= deadline {
            warn!("database operation timed out, insufficient time to save data");
            return Err(StoreError::Timeout);
        }

        let (tx, stored) =
            match tokio::time::timeout_at(deadline, self.insert_uncommitted(quote)).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!("database operation timed out, insufficient time to save data");
                    return Err(StoreError::Timeout);
                }
            };

        if Instant::now() >= deadline {
            warn!(id = stored.id, "insert finished past the deadline, rolling back");
            drop(tx);
            return Err(StoreError::Timeout);
        }

        tx.commit().await?;
        debug!(id = stored.id, bid = %stored.quote.bid, "quote inserted");
        Ok(stored)
    }

    async fn insert_uncommitted(
        &self,
        quote: &PriceQuote,
    ) -> Result<(Transaction<'static, Sqlite>, StoredQuote), StoreError> {
        let created_at = Utc::now();
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO quotes (code, codein, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&quote.code)
        .bind(&quote.codein)
        .bind(&quote.name)
        .bind(&quote.high)
        .bind(&quote.low)
        .bind(&quote.var_bid)
        .bind(&quote.pct_change)
        .bind(&quote.bid)
        .bind(&quote.ask)
        .bind(&quote.timestamp)
        .bind(&quote.create_date)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let stored = StoredQuote {
            id: result.last_insert_rowid(),
            created_at,
            quote: quote.clone(),
        };
        Ok((tx, stored))
    }

    /// Reads one stored quote back by id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find(&self, id: i64) -> Result<Option<StoredQuote>, StoreError> {
        let row = sqlx::query_as::<_, StoredQuote>(
            r#"
            SELECT id, code, codein, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date, created_at
            FROM quotes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row)
    }
}
