//! Aggregate listings backed by stored functions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::file::{File, RecentFile};
use zenith_entity::folder::Folder;
use zenith_entity::item::Item;
use zenith_entity::permission::Role;
use zenith_entity::star::ResourceType;

use crate::error::map_db_error;
use crate::store::ContentStore;

/// Row shape returned by `get_user_content` and `get_shared_content`.
///
/// Folder rows leave the file-only columns null; `parent_id` carries the
/// file's `folder_id` for file rows.
#[derive(Debug, FromRow)]
struct ContentRow {
    item_id: Uuid,
    #[sqlx(rename = "type")]
    kind: ResourceType,
    name: String,
    owner_id: Uuid,
    parent_id: Option<Uuid>,
    storage_path: Option<String>,
    mime_type: Option<String>,
    size: Option<i64>,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_starred: bool,
    #[sqlx(default)]
    owner_name: Option<String>,
    #[sqlx(default)]
    role: Option<Role>,
}

impl ContentRow {
    fn into_item(self) -> Item {
        let item = match self.kind {
            ResourceType::Folder => Item::folder(Folder {
                id: self.item_id,
                name: self.name,
                owner_id: self.owner_id,
                parent_id: self.parent_id,
                is_deleted: self.is_deleted,
                deleted_at: self.deleted_at,
                created_at: self.created_at,
            }),
            ResourceType::File => Item::file(File {
                id: self.item_id,
                name: self.name,
                owner_id: self.owner_id,
                folder_id: self.parent_id,
                storage_path: self.storage_path.unwrap_or_default(),
                mime_type: self.mime_type,
                size: self.size,
                is_deleted: self.is_deleted,
                deleted_at: self.deleted_at,
                created_at: self.created_at,
                updated_at: self.updated_at.unwrap_or(self.created_at),
            }),
        };

        let item = item.with_star(self.is_starred);
        match (self.owner_name, self.role) {
            (Some(owner_name), Some(role)) => item.with_share(owner_name, role),
            _ => item,
        }
    }
}

/// Repository for browse, recent and shared-with-me listings.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    pool: PgPool,
}

impl ContentRepository {
    /// Create a new content repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for ContentRepository {
    async fn user_content(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ContentRow>(
            "SELECT * FROM get_user_content($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(parent_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to load folder contents"))?;

        Ok(rows.into_iter().map(ContentRow::into_item).collect())
    }

    async fn recent_files(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<RecentFile>> {
        sqlx::query_as::<_, RecentFile>("SELECT * FROM get_recent_files($1, $2)")
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("Failed to load recent files"))
    }

    async fn shared_content(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ContentRow>("SELECT * FROM get_shared_content($1)")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error("Failed to load shared content"))?;

        Ok(rows.into_iter().map(ContentRow::into_item).collect())
    }
}
