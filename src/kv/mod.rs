//! Key-value store with per-entry time-to-live.
//!
//! Session tokens are kept here. Two backends are provided: one sharing the
//! SQLite pool, one in process memory. Both treat an expired entry exactly
//! like a missing one.

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Ephemeral key-value store.
///
/// Infrastructure failures are returned as errors and are never folded
/// into "absent".
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Look up a live entry.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous entry, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Delete an entry. Returns whether a live entry existed.
    async fn del(&self, key: &str) -> Result<bool>;

    /// Drop expired entries. Returns how many were removed.
    async fn purge_expired(&self) -> Result<u64>;

    /// Readiness check.
    async fn is_alive(&self) -> bool;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
