//! Configuration module for filevault.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, VaultError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins (empty = any origin).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/files_manager.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Content storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Root directory of the content store.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Maximum request body size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_path() -> String {
    "/tmp/files_manager".to_string()
}

fn default_max_upload_size() -> u64 {
    10
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Which key-value store holds session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Tokens live in the database (`kv_entries` table).
    #[default]
    Database,
    /// Tokens live in process memory and are lost on restart.
    Memory,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Key-value backend for session tokens.
    #[serde(default)]
    pub backend: SessionBackend,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    /// Interval between purges of expired tokens, in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_session_ttl() -> u64 {
    24 * 60 * 60
}

fn default_cleanup_interval() -> u64 {
    3600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            ttl_secs: default_session_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty logs to the console only.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Content storage configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VaultError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VaultError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FOLDER_PATH`: content store root
    /// - `DB_PATH`: database file
    /// - `HOST`: bind address
    /// - `PORT`: listen port
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup function.
    ///
    /// Empty values are ignored, as are ports that do not parse.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(path) = get("FOLDER_PATH") {
            self.files.storage_path = path;
        }
        if let Some(path) = get("DB_PATH") {
            self.database.path = path;
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.session.ttl_secs == 0 {
            return Err(VaultError::Config(
                "session.ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.files.storage_path.is_empty() {
            return Err(VaultError::Config(
                "files.storage_path must not be empty".to_string(),
            ));
        }
        if self.database.path.is_empty() {
            return Err(VaultError::Config(
                "database.path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
