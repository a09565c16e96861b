//! Password digests for filevault.
//!
//! Uses Argon2id; digests are self-describing PHC strings.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Stored digest is not a valid PHC string.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password does not match the digest.
    #[error("password verification failed")]
    VerificationFailed,
}

/// Create the Argon2 hasher.
///
/// Memory cost 19 MiB, 2 iterations, 1 lane.
fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params =
        Params::new(19 * 1024, 2, 1, None).map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Compute the digest of a password.
///
/// # Examples
///
/// ```
/// use filevault::hash_password;
///
/// let digest = hash_password("secret").unwrap();
/// assert!(digest.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = create_argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored digest.
///
/// # Examples
///
/// ```
/// use filevault::{hash_password, verify_password};
///
/// let digest = hash_password("secret").unwrap();
/// assert!(verify_password("secret", &digest).is_ok());
/// assert!(verify_password("guess", &digest).is_err());
/// ```
pub fn verify_password(password: &str, digest: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(digest).map_err(|_| PasswordError::InvalidHash)?;

    // Parameters come from the parsed digest.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PasswordError::VerificationFailed)
}
