//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::file::{CreateFile, File};

use crate::error::map_db_error;
use crate::store::FileStore;

/// Column list shared by every file query (excludes the `fts` column).
const FILE_COLUMNS: &str = "id, name, owner_id, folder_id, storage_path, mime_type, size, \
                            is_deleted, deleted_at, created_at, updated_at";

/// Repository for file metadata rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn create(&self, data: CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(&format!(
            "INSERT INTO files (name, owner_id, folder_id, storage_path, mime_type, size) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {FILE_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.folder_id)
        .bind(&data.storage_path)
        .bind(&data.mime_type)
        .bind(data.size)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("Failed to create file"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(&format!("SELECT {FILE_COLUMNS} FROM files WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("Failed to find file"))
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to find file"))
    }

    async fn find_active_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE id = ANY($1) AND is_deleted = FALSE"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to find files"))
    }

    async fn trash(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(&format!(
            "UPDATE files SET is_deleted = TRUE, deleted_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING {FILE_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to move file to trash"))
    }

    async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(&format!(
            "UPDATE files SET is_deleted = FALSE, deleted_at = NULL \
             WHERE id = $1 AND owner_id = $2 RETURNING {FILE_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to restore file"))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_db_error("Failed to begin transaction"))?;

        let deleted = sqlx::query("DELETE FROM files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error("Failed to delete file"))?
            .rows_affected();

        if deleted > 0 {
            sqlx::query("DELETE FROM stars WHERE resource_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error("Failed to delete file stars"))?;
        }

        tx.commit()
            .await
            .map_err(map_db_error("Failed to commit file deletion"))?;
        Ok(deleted > 0)
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(&format!(
            "SELECT {FILE_COLUMNS} FROM files WHERE owner_id = $1 AND is_deleted = TRUE \
             ORDER BY deleted_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to list trashed files"))
    }

    async fn search(&self, owner_id: Uuid, tsquery: &str) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(&format!(
            "SELECT {FILE_COLUMNS} FROM files \
             WHERE owner_id = $1 AND is_deleted = FALSE AND fts @@ to_tsquery('simple', $2) \
             ORDER BY name ASC"
        ))
        .bind(owner_id)
        .bind(tsquery)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to search files"))
    }
}
