//! Key-value store backed by the `kv_entries` table.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::KeyValueStore;
use crate::db::DbPool;
use crate::{Result, VaultError};

/// Key-value store sharing the database pool.
///
/// Expiry is absolute, in unix epoch milliseconds, compared against the
/// application clock rather than SQLite's.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: DbPool,
}

impl SqliteKvStore {
    /// Create a store over an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar(
            "SELECT value FROM kv_entries WHERE key = $1 AND expires_at_ms > $2",
        )
        .bind(key)
        .bind(Self::now_ms())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| VaultError::KeyValue(e.to_string()))?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at = Self::now_ms().saturating_add(ttl_ms);

        sqlx::query(
            "INSERT INTO kv_entries (key, value, expires_at_ms) VALUES ($1, $2, $3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at_ms = excluded.expires_at_ms",
        )
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| VaultError::KeyValue(e.to_string()))?;

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let expires_at: Option<i64> =
            sqlx::query_scalar("DELETE FROM kv_entries WHERE key = $1 RETURNING expires_at_ms")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| VaultError::KeyValue(e.to_string()))?;

        Ok(expires_at.is_some_and(|at| at > Self::now_ms()))
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM kv_entries WHERE expires_at_ms <= $1")
            .bind(Self::now_ms())
            .execute(&self.pool)
            .await
            .map_err(|e| VaultError::KeyValue(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn is_alive(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM kv_entries WHERE 0")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
