//! Credential verification.

use tracing::{debug, warn};

use super::password::{verify_password, PasswordError};
use crate::db::{DbPool, User, UserRepository};
use crate::Result;

/// Check an email/password pair against the stored users.
///
/// Unknown email and wrong password both yield `Ok(None)`, so callers cannot
/// tell which one was wrong. Only store failures are errors.
pub async fn verify_credentials(pool: &DbPool, email: &str, password: &str) -> Result<Option<User>> {
    let user = match UserRepository::new(pool).get_by_email(email).await? {
        Some(user) => user,
        None => {
            debug!(email = %email, "Credential check failed: unknown email");
            return Ok(None);
        }
    };

    match verify_password(password, &user.password_digest) {
        Ok(()) => Ok(Some(user)),
        Err(PasswordError::InvalidHash) => {
            warn!(user_id = %user.id, "Stored password digest is malformed");
            Ok(None)
        }
        Err(_) => {
            debug!(user_id = %user.id, "Credential check failed: wrong password");
            Ok(None)
        }
    }
}
