//! Error types for filevault.

use thiserror::Error;

/// Infrastructure error shared by the stores and the service layer.
///
/// Validation and authentication outcomes are not represented here; they are
/// returned as typed results by the components that produce them.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error from the content store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key-value store error.
    #[error("key-value store error: {0}")]
    KeyValue(String),

    /// Resource that must exist was missing.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for VaultError {
    fn from(e: sqlx::Error) -> Self {
        VaultError::Database(e.to_string())
    }
}

/// Result type alias for filevault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_error_display() {
        let err = VaultError::KeyValue("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "key-value store error: connection refused"
        );
    }

    #[test]
    fn test_not_found_error_display() {
        let err = VaultError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: VaultError = io_err.into();
        assert!(matches!(err, VaultError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: VaultError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, VaultError::Database(_)));
    }

    #[test]
    fn test_config_error_display() {
        let err = VaultError::Config("ttl_secs must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: ttl_secs must be positive"
        );
    }
}
