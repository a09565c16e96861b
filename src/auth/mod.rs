//! Authentication module for filevault.
//!
//! Password digests, credential verification and session tokens.

mod credentials;
mod password;
mod session;

pub use credentials::verify_credentials;
pub use password::{hash_password, verify_password, PasswordError};
pub use session::{SessionManager, DEFAULT_SESSION_DURATION_SECS};
