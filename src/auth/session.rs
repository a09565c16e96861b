//! Session token management for filevault.
//!
//! A session is a `auth_<token>` entry in the key-value store whose value is
//! the owning user's ID. The store enforces the TTL; resolving a token never
//! extends it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::db::UserId;
use crate::kv::KeyValueStore;
use crate::Result;

/// Default session duration (24 hours).
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 24 * 60 * 60;

/// Key prefix for session entries.
const SESSION_KEY_PREFIX: &str = "auth_";

/// Issues, resolves and revokes session tokens.
///
/// Multiple concurrent sessions per user are allowed.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a session manager with the default 24 hour TTL.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_ttl(store, Duration::from_secs(DEFAULT_SESSION_DURATION_SECS))
    }

    /// Create a session manager with a custom TTL.
    pub fn with_ttl(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Session lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The underlying key-value store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    fn key(token: &str) -> String {
        format!("{SESSION_KEY_PREFIX}{token}")
    }

    /// Tokens are UUID strings; anything else cannot have been issued here.
    fn is_well_formed(token: &str) -> bool {
        Uuid::parse_str(token).is_ok()
    }

    /// Issue a new token bound to `user_id`.
    pub async fn issue(&self, user_id: UserId) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        self.store
            .set(&Self::key(&token), &user_id.to_string(), self.ttl)
            .await?;

        info!(user_id = %user_id, ttl_secs = self.ttl.as_secs(), "Session issued");
        Ok(token)
    }

    /// Resolve a token to its user.
    ///
    /// Returns `Ok(None)` for absent, malformed, revoked or expired tokens.
    pub async fn resolve(&self, token: &str) -> Result<Option<UserId>> {
        if !Self::is_well_formed(token) {
            debug!("Session lookup skipped: malformed token");
            return Ok(None);
        }

        let Some(value) = self.store.get(&Self::key(token)).await? else {
            return Ok(None);
        };

        match value.parse::<UserId>() {
            Ok(user_id) => Ok(Some(user_id)),
            Err(_) => {
                warn!("Session entry holds a non-numeric user id");
                Ok(None)
            }
        }
    }

    /// Revoke a token. Returns whether a live session existed.
    ///
    /// Revoking an unknown or already revoked token is not an error.
    pub async fn revoke(&self, token: &str) -> Result<bool> {
        if !Self::is_well_formed(token) {
            return Ok(false);
        }

        let existed = self.store.del(&Self::key(token)).await?;
        if existed {
            info!("Session revoked");
        } else {
            debug!("Revoke: session not found");
        }
        Ok(existed)
    }

    /// Drop expired sessions from the store.
    pub async fn cleanup(&self) -> Result<u64> {
        let removed = self.store.purge_expired().await?;
        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired sessions");
        }
        Ok(removed)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("backend", &self.store.backend_name())
            .field("ttl", &self.ttl)
            .finish()
    }
}
