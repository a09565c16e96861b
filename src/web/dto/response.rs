//! Response DTOs for the HTTP interface.

use serde::Serialize;

use crate::db::UserId;
use crate::file::{FileId, FileRecord, FileType, ParentRef};

/// File metadata as exposed to clients. The content location is omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: FileId,
    pub user_id: UserId,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub is_public: bool,
    /// `0` for the root.
    pub parent_id: ParentRef,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            file_type: record.file_type,
            is_public: record.is_public,
            parent_id: record.parent_id,
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Readiness of the backing stores.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub db: bool,
    pub kv: bool,
}

/// Record counts.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub users: i64,
    pub files: i64,
}

/// Current user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: UserId,
    pub email: String,
}
