//! Permission repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::permission::{CreatePermission, Permission, PermissionGrant, Role};

use crate::error::map_db_error;
use crate::store::PermissionStore;

/// Repository for file sharing grants.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionStore for PermissionRepository {
    async fn create(&self, data: CreatePermission) -> AppResult<Permission> {
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions (file_id, user_id, role) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.file_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("Failed to create permission"))
    }

    async fn find_for_user(&self, file_id: Uuid, user_id: Uuid) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions WHERE file_id = $1 AND user_id = $2",
        )
        .bind(file_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error("Failed to find permission"))
    }

    async fn list_for_file(&self, file_id: Uuid) -> AppResult<Vec<PermissionGrant>> {
        sqlx::query_as::<_, PermissionGrant>(
            "SELECT p.id, p.role, u.email FROM permissions p \
             INNER JOIN users u ON u.id = p.user_id \
             WHERE p.file_id = $1 ORDER BY p.created_at ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to list permissions"))
    }

    async fn update_role(
        &self,
        id: Uuid,
        owner_id: Uuid,
        role: Role,
    ) -> AppResult<Option<Permission>> {
        sqlx::query_as::<_, Permission>("SELECT * FROM update_permission($1, $2, $3)")
            .bind(id)
            .bind(owner_id)
            .bind(role)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error("Failed to update permission"))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT delete_permission($1, $2)")
            .bind(id)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error("Failed to delete permission"))
    }
}
