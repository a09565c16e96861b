//! File Metadata Engine.
//!
//! Validates uploads, writes content through [`FileStorage`] and persists
//! records through [`FileRepository`]. Reads are always scoped to the owner.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::metadata::FileRepository;
use super::storage::{FileStorage, StoreError};
use super::types::{FileId, FileRecord, FileType, NewFileRecord, ParentRef};
use crate::db::{DbPool, UserId};
use crate::{Result, VaultError};

/// Why an upload was refused.
///
/// Every variant except `Internal` is a client fault.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Missing name")]
    MissingName,

    #[error("Missing type")]
    InvalidType,

    #[error("Missing data")]
    MissingData,

    #[error("Parent not found")]
    ParentNotFound,

    #[error("Parent is not a folder")]
    ParentNotFolder,

    #[error("Invalid data")]
    InvalidData,

    #[error(transparent)]
    Internal(#[from] VaultError),
}

impl UploadError {
    /// Machine-readable reason, `None` for infrastructure failures.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            UploadError::MissingName => Some("MissingField"),
            UploadError::InvalidType => Some("InvalidType"),
            UploadError::MissingData => Some("MissingData"),
            UploadError::ParentNotFound => Some("ParentNotFound"),
            UploadError::ParentNotFolder => Some("ParentNotFolder"),
            UploadError::InvalidData => Some("InvalidData"),
            UploadError::Internal(_) => None,
        }
    }
}

/// Upload fields as received from a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct UploadInput {
    pub name: Option<String>,
    pub file_type: Option<String>,
    /// Absent means root.
    pub parent_id: Option<String>,
    pub is_public: bool,
    /// Base64 payload; required unless the type is `folder`.
    pub data: Option<String>,
}

impl UploadInput {
    /// Create an input with a name and type.
    pub fn new(name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_type: Some(file_type.into()),
            ..Self::default()
        }
    }

    pub fn parent(mut self, parent_id: impl ToString) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// File service.
pub struct FileService<'a> {
    pool: &'a DbPool,
    storage: &'a FileStorage,
}

impl<'a> FileService<'a> {
    pub fn new(pool: &'a DbPool, storage: &'a FileStorage) -> Self {
        Self { pool, storage }
    }

    /// Create a folder, file or image record for `owner`.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// name, type, data, parent. Content is written only after every check
    /// passes, and the record is inserted only after the content is on disk.
    pub async fn create(
        &self,
        owner: UserId,
        input: UploadInput,
    ) -> std::result::Result<FileRecord, UploadError> {
        let name = match input.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(UploadError::MissingName),
        };

        let file_type: FileType = input
            .file_type
            .as_deref()
            .and_then(|t| t.parse().ok())
            .ok_or(UploadError::InvalidType)?;

        let data = match input.data {
            Some(data) if !data.is_empty() => Some(data),
            _ if file_type.has_content() => return Err(UploadError::MissingData),
            _ => None,
        };

        let parent = match input.parent_id.as_deref() {
            None => ParentRef::Root,
            Some(raw) => ParentRef::parse(raw).ok_or(UploadError::ParentNotFound)?,
        };
        self.check_parent(owner, parent).await?;

        let repo = FileRepository::new(self.pool);

        let Some(data) = data.filter(|_| file_type.has_content()) else {
            let record = repo
                .insert(&NewFileRecord::folder(owner, name, parent).public(input.is_public))
                .await?;
            info!(user_id = %owner, file_id = %record.id, "Folder created");
            return Ok(record);
        };

        let path = self
            .storage
            .store_encoded(&data)
            .await
            .map_err(|e| match e {
                StoreError::Decode(_) => UploadError::InvalidData,
                StoreError::Io(e) => UploadError::Internal(e),
            })?;

        let Some(local_path) = path.to_str() else {
            self.discard(&path).await;
            return Err(VaultError::Config(format!(
                "storage path is not valid UTF-8: {}",
                path.display()
            ))
            .into());
        };

        let new_file =
            NewFileRecord::with_content(owner, name, file_type, parent, local_path)
                .public(input.is_public);

        match repo.insert(&new_file).await {
            Ok(record) => {
                info!(user_id = %owner, file_id = %record.id, file_type = %file_type, "File stored");
                Ok(record)
            }
            Err(e) => {
                self.discard(&path).await;
                Err(e.into())
            }
        }
    }

    /// Remove content that no record will point to.
    async fn discard(&self, path: &Path) {
        if let Err(e) = self.storage.delete(path).await {
            warn!(error = %e, path = %path.display(), "Failed to remove orphaned content");
        }
    }

    /// The parent must be the root or a folder owned by `owner`.
    async fn check_parent(&self, owner: UserId, parent: ParentRef) -> std::result::Result<(), UploadError> {
        let ParentRef::Folder(parent_id) = parent else {
            return Ok(());
        };

        match FileRepository::new(self.pool).get_owned(owner, parent_id).await? {
            None => {
                debug!(user_id = %owner, parent_id = %parent_id, "Upload rejected: parent not found");
                Err(UploadError::ParentNotFound)
            }
            Some(record) if record.file_type != FileType::Folder => {
                debug!(user_id = %owner, parent_id = %parent_id, "Upload rejected: parent is not a folder");
                Err(UploadError::ParentNotFolder)
            }
            Some(_) => Ok(()),
        }
    }

    /// Get a record owned by `owner`. Other users' records are `None`.
    pub async fn get_owned(&self, owner: UserId, id: FileId) -> Result<Option<FileRecord>> {
        FileRepository::new(self.pool).get_owned(owner, id).await
    }

    /// List one page of `owner`'s records under `parent`.
    pub async fn list(&self, owner: UserId, parent: ParentRef, page: i64) -> Result<Vec<FileRecord>> {
        FileRepository::new(self.pool).list(owner, parent, page).await
    }
}
