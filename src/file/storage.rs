//! Content store for filevault.
//!
//! File bytes live on local disk under UUID names, sharded by the first two
//! characters of the name:
//!
//! ```text
//! {base_path}/
//! ├── ab/
//! │   └── ab12cd34-5678-90ab-cdef-123456789012
//! ├── cd/
//! │   └── cd90ab12-3456-7890-abcd-ef1234567890
//! └── ...
//! ```
//!
//! Writes go to a `.part` sibling first and are renamed into place, so a
//! reader never sees a partially written file.

use std::io;
use std::path::{Path, PathBuf};

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::{Result, VaultError};

/// Standard alphabet with optional padding and lenient trailing bits.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Failure to store an encoded payload.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The payload is not valid base64.
    #[error("payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Writing to disk failed.
    #[error(transparent)]
    Io(#[from] VaultError),
}

/// Local-disk content store.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `base_path`.
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Decode a base64 payload.
    ///
    /// Padding is optional and ASCII whitespace anywhere in the payload is
    /// skipped, so line-wrapped output of the `base64` tool is accepted.
    pub fn decode_payload(encoded: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
        let compact: Vec<u8> = encoded
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        PAYLOAD_ENGINE.decode(compact)
    }

    /// Decode a base64 payload and store it.
    pub async fn store_encoded(&self, encoded: &str) -> std::result::Result<PathBuf, StoreError> {
        let content = Self::decode_payload(encoded)?;
        Ok(self.store(&content).await?)
    }

    /// Store bytes under a freshly generated name and return the full path.
    pub async fn store(&self, content: &[u8]) -> Result<PathBuf> {
        let stored_name = Self::generate_stored_name();
        let file_path = self.get_file_path(&stored_name);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let part_path = file_path.with_extension("part");
        if let Err(e) = fs::write(&part_path, content).await {
            let _ = fs::remove_file(&part_path).await;
            return Err(e.into());
        }
        fs::rename(&part_path, &file_path).await?;

        debug!(path = %file_path.display(), size = content.len(), "Stored content");
        Ok(file_path)
    }

    /// Read content back from a path returned by [`store`](Self::store).
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        match fs::read(path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VaultError::NotFound(format!("content {}", path.display())))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete stored content. Returns `false` if it did not exist.
    pub async fn delete(&self, path: impl AsRef<Path>) -> Result<bool> {
        match fs::remove_file(path.as_ref()).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Full path for a stored name: `{base_path}/{shard}/{stored_name}`.
    pub fn get_file_path(&self, stored_name: &str) -> PathBuf {
        self.base_path
            .join(Self::get_shard(stored_name))
            .join(stored_name)
    }

    fn get_shard(stored_name: &str) -> &str {
        stored_name.get(..2).unwrap_or(stored_name)
    }

    fn generate_stored_name() -> String {
        Uuid::new_v4().to_string()
    }
}
