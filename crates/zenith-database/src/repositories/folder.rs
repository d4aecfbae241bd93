//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::folder::{Breadcrumb, CreateFolder, Folder};

use crate::error::map_db_error;
use crate::store::FolderStore;

/// Column list shared by every folder query (excludes the `fts` column).
const FOLDER_COLUMNS: &str = "id, name, owner_id, parent_id, is_deleted, deleted_at, created_at";

/// Repository for folder rows.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn create(&self, data: CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            "INSERT INTO folders (name, owner_id, parent_id) VALUES ($1, $2, $3) \
             RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("Failed to create folder"))
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to find folder"))
    }

    async fn find_active_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE id = ANY($1) AND is_deleted = FALSE"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to find folders"))
    }

    async fn trash(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET is_deleted = TRUE, deleted_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to move folder to trash"))
    }

    async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET is_deleted = FALSE, deleted_at = NULL \
             WHERE id = $1 AND owner_id = $2 RETURNING {FOLDER_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to restore folder"))
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders WHERE owner_id = $1 AND is_deleted = TRUE \
             ORDER BY deleted_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to list trashed folders"))
    }

    async fn search(&self, owner_id: Uuid, tsquery: &str) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {FOLDER_COLUMNS} FROM folders \
             WHERE owner_id = $1 AND is_deleted = FALSE AND fts @@ to_tsquery('simple', $2) \
             ORDER BY name ASC"
        ))
        .bind(owner_id)
        .bind(tsquery)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to search folders"))
    }

    async fn delete_permanently(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<Option<Vec<String>>> {
        sqlx::query_scalar::<_, Option<Vec<String>>>("SELECT delete_folder_permanently($1, $2)")
            .bind(id)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("Failed to delete folder"))
    }

    async fn breadcrumbs(&self, id: Uuid, owner_id: Uuid) -> AppResult<Vec<Breadcrumb>> {
        sqlx::query_as::<_, Breadcrumb>("SELECT id, name FROM get_folder_breadcrumbs($1, $2)")
            .bind(id)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("Failed to resolve breadcrumbs"))
    }
}
