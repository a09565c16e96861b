//! File record types for filevault.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::db::UserId;

/// Opaque file record identifier assigned by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct FileId(pub i64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(FileId)
    }
}

/// Unrecognized file type string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown file type: {0}")]
pub struct FileTypeError(pub String);

/// Kind of a file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Container for other records; has no content.
    Folder,
    /// Generic file with content.
    File,
    /// Image with content.
    Image,
}

impl FileType {
    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Folder => "folder",
            FileType::File => "file",
            FileType::Image => "image",
        }
    }

    /// Whether records of this type carry content.
    pub fn has_content(&self) -> bool {
        !matches!(self, FileType::Folder)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = FileTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(FileType::Folder),
            "file" => Ok(FileType::File),
            "image" => Ok(FileType::Image),
            other => Err(FileTypeError(other.to_string())),
        }
    }
}

impl TryFrom<String> for FileType {
    type Error = FileTypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parent of a file record: the root, or a folder record.
///
/// Serialized as `0` for the root and as the folder's id otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    #[default]
    Root,
    Folder(FileId),
}

impl ParentRef {
    /// Parse a client-supplied parent id.
    ///
    /// `""` and `"0"` are the root. Returns `None` for anything that is not
    /// an integer id.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Some(ParentRef::Root);
        }
        match s.parse::<i64>().ok()? {
            0 => Some(ParentRef::Root),
            id => Some(ParentRef::Folder(FileId(id))),
        }
    }

    /// Column value: `NULL` for the root.
    pub fn to_column(self) -> Option<FileId> {
        match self {
            ParentRef::Root => None,
            ParentRef::Folder(id) => Some(id),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ParentRef::Root)
    }
}

impl From<Option<i64>> for ParentRef {
    fn from(value: Option<i64>) -> Self {
        match value {
            None | Some(0) => ParentRef::Root,
            Some(id) => ParentRef::Folder(FileId(id)),
        }
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParentRef::Root => serializer.serialize_i64(0),
            ParentRef::Folder(id) => serializer.serialize_i64(id.0),
        }
    }
}

/// A folder, file or image record.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FileRecord {
    pub id: FileId,
    /// Owner; never changes after creation.
    pub user_id: UserId,
    pub name: String,
    #[sqlx(rename = "type", try_from = "String")]
    pub file_type: FileType,
    #[sqlx(try_from = "Option<i64>")]
    pub parent_id: ParentRef,
    pub is_public: bool,
    /// Content location. `None` for folders.
    pub local_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a file record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub user_id: UserId,
    pub name: String,
    pub file_type: FileType,
    pub parent_id: ParentRef,
    pub is_public: bool,
    pub local_path: Option<String>,
}

impl NewFileRecord {
    /// Create a folder record.
    pub fn folder(user_id: UserId, name: impl Into<String>, parent_id: ParentRef) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type: FileType::Folder,
            parent_id,
            is_public: false,
            local_path: None,
        }
    }

    /// Create a record for stored content.
    pub fn with_content(
        user_id: UserId,
        name: impl Into<String>,
        file_type: FileType,
        parent_id: ParentRef,
        local_path: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type,
            parent_id,
            is_public: false,
            local_path: Some(local_path.into()),
        }
    }

    /// Set the public flag.
    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}
