//! Store bundle selected by configuration.

use std::sync::Arc;

use tracing::info;

use zenith_core::config::database::DatabaseConfig;
use zenith_core::error::AppError;
use zenith_core::result::AppResult;

use super::{ContentStore, FileStore, FolderStore, PermissionStore, StarStore, UserStore};
use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::migration::run_migrations;
use crate::repositories::{
    ContentRepository, FileRepository, FolderRepository, PermissionRepository, StarRepository,
    UserRepository,
};

/// One handle per store trait, all backed by the same database.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Folder rows.
    pub folders: Arc<dyn FolderStore>,
    /// File metadata rows.
    pub files: Arc<dyn FileStore>,
    /// Sharing grants.
    pub permissions: Arc<dyn PermissionStore>,
    /// Stars.
    pub stars: Arc<dyn StarStore>,
    /// Aggregate listings.
    pub content: Arc<dyn ContentStore>,
}

impl Stores {
    /// Build the stores for the configured backend.
    ///
    /// For PostgreSQL the pool is returned too, so the caller can close it
    /// on shutdown.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<(Self, Option<DatabasePool>)> {
        match config.provider.as_str() {
            "postgres" => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok((Self::postgres(&db), Some(db)))
            }
            "memory" => {
                info!("Using in-memory store; data is lost on restart");
                Ok((Self::memory(), None))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(db: &DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            folders: Arc::new(FolderRepository::new(pool.clone())),
            files: Arc::new(FileRepository::new(pool.clone())),
            permissions: Arc::new(PermissionRepository::new(pool.clone())),
            stars: Arc::new(StarRepository::new(pool.clone())),
            content: Arc::new(ContentRepository::new(pool)),
        }
    }

    /// A fresh, empty in-memory database.
    pub fn memory() -> Self {
        Self::from_memory(Arc::new(MemoryDatabase::new()))
    }

    /// Stores sharing an existing in-memory database.
    pub fn from_memory(db: Arc<MemoryDatabase>) -> Self {
        Self {
            users: db.clone(),
            folders: db.clone(),
            files: db.clone(),
            permissions: db.clone(),
            stars: db.clone(),
            content: db,
        }
    }
}
