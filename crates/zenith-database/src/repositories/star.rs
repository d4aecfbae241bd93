//! Star repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::star::{CreateStar, Star};

use crate::error::map_db_error;
use crate::store::StarStore;

/// Repository for per-user stars.
#[derive(Debug, Clone)]
pub struct StarRepository {
    pool: PgPool,
}

impl StarRepository {
    /// Create a new star repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StarStore for StarRepository {
    async fn create(&self, data: CreateStar) -> AppResult<Star> {
        sqlx::query_as::<_, Star>(
            "INSERT INTO stars (user_id, resource_id, resource_type) VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.resource_id)
        .bind(data.resource_type)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error("Failed to star item"))
    }

    async fn delete(&self, user_id: Uuid, resource_id: Uuid) -> AppResult<u64> {
        sqlx::query("DELETE FROM stars WHERE user_id = $1 AND resource_id = $2")
            .bind(user_id)
            .bind(resource_id)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(map_db_error("Failed to unstar item"))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Star>> {
        sqlx::query_as::<_, Star>(
            "SELECT * FROM stars WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error("Failed to list stars"))
    }
}
