//! HTTP handlers.

pub mod app;
pub mod auth;
pub mod file;
pub mod user;

pub use app::*;
pub use auth::*;
pub use file::*;
pub use user::*;

use std::sync::Arc;

use crate::auth::SessionManager;
use crate::file::FileStorage;
use crate::Database;

/// Application state shared across handlers.
///
/// Each store client is constructed once at startup and handed in here.
#[derive(Clone)]
pub struct AppState {
    /// Document store.
    pub db: Database,
    /// Session tokens over the key-value store.
    pub sessions: Arc<SessionManager>,
    /// Content store.
    pub storage: FileStorage,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, sessions: Arc<SessionManager>, storage: FileStorage) -> Self {
        Self {
            db,
            sessions,
            storage,
        }
    }
}
