//! filevault - authenticated file storage service
//!
//! Users log in with Basic credentials to obtain a session token, then
//! create folders, files and images and read back the records they own.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod kv;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, verify_credentials, verify_password, PasswordError, SessionManager,
    DEFAULT_SESSION_DURATION_SECS,
};
pub use config::{Config, SessionBackend};
pub use db::{Database, NewUser, User, UserId, UserRepository};
pub use error::{Result, VaultError};
pub use file::{
    FileId, FileRecord, FileRepository, FileService, FileStorage, FileType, ParentRef,
    UploadError, UploadInput,
};
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use web::{create_router, AppState, WebServer};
