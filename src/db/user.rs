//! User model for filevault.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Opaque user identifier assigned by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(UserId)
    }
}

/// A registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address (unique, case-sensitive).
    pub email: String,
    /// One-way digest of the password.
    pub password_digest: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Password digest (already hashed).
    pub password_digest: String,
}

impl NewUser {
    /// Create a new NewUser from an email and an already computed digest.
    pub fn new(email: impl Into<String>, password_digest: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_digest: password_digest.into(),
        }
    }
}
