//! File record repository for filevault.

use super::types::{FileId, FileRecord, NewFileRecord, ParentRef};
use crate::db::{DbPool, UserId};
use crate::{Result, VaultError};

/// Records per listing page.
pub const PAGE_SIZE: i64 = 20;

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, name, type, parent_id, is_public, local_path, created_at FROM files";

/// Repository for file records.
pub struct FileRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> FileRepository<'a> {
    /// Create a new FileRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a record and return it with its assigned ID.
    pub async fn insert(&self, file: &NewFileRecord) -> Result<FileRecord> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO files (user_id, name, type, parent_id, is_public, local_path)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(file.user_id)
        .bind(&file.name)
        .bind(file.file_type.as_str())
        .bind(file.parent_id.to_column())
        .bind(file.is_public)
        .bind(&file.local_path)
        .fetch_one(self.pool)
        .await
        .map_err(|e| VaultError::Database(e.to_string()))?;

        self.get_by_id(FileId(id))
            .await?
            .ok_or_else(|| VaultError::NotFound(format!("file {id}")))
    }

    /// Get a record by ID regardless of owner.
    pub async fn get_by_id(&self, id: FileId) -> Result<Option<FileRecord>> {
        let file = sqlx::query_as::<_, FileRecord>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(file)
    }

    /// Get a record only if `owner` owns it.
    pub async fn get_owned(&self, owner: UserId, id: FileId) -> Result<Option<FileRecord>> {
        let file = sqlx::query_as::<_, FileRecord>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        Ok(file)
    }

    /// List one page of `owner`'s records.
    ///
    /// `ParentRef::Root` does not filter by parent: every record the owner
    /// has is listed, nested or not. A negative page is treated as 0.
    pub async fn list(&self, owner: UserId, parent: ParentRef, page: i64) -> Result<Vec<FileRecord>> {
        let offset = page.max(0).saturating_mul(PAGE_SIZE);

        let files = match parent {
            ParentRef::Root => {
                sqlx::query_as::<_, FileRecord>(&format!(
                    "{SELECT_COLUMNS} WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3"
                ))
                .bind(owner)
                .bind(PAGE_SIZE)
                .bind(offset)
                .fetch_all(self.pool)
                .await?
            }
            ParentRef::Folder(parent_id) => {
                sqlx::query_as::<_, FileRecord>(&format!(
                    "{SELECT_COLUMNS} WHERE user_id = $1 AND parent_id = $2
                     ORDER BY id LIMIT $3 OFFSET $4"
                ))
                .bind(owner)
                .bind(parent_id)
                .bind(PAGE_SIZE)
                .bind(offset)
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(files)
    }

    /// Count all records.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
