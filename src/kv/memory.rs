//! In-process key-value store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::Result;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Key-value store held in memory.
///
/// Entries are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryKvStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// True if no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            // Saturate absurd TTLs at roughly a century
            expires_at: now
                .checked_add(ttl)
                .unwrap_or(now + Duration::from_secs(100 * 365 * 24 * 3600)),
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        let removed = self.entries.lock().await.remove(key);
        Ok(removed.is_some_and(|entry| entry.is_live(now)))
    }

    async fn purge_expired(&self) -> Result<u64> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        Ok((before - entries.len()) as u64)
    }

    async fn is_alive(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
