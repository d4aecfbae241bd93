//! Folder lifecycle: create, trash, restore, purge, breadcrumbs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use zenith_core::error::AppError;
use zenith_core::result::AppResult;
use zenith_core::traits::storage::StorageProvider;
use zenith_database::store::FolderStore;
use zenith_entity::folder::{Breadcrumb, CreateFolder, Folder};

use crate::context::RequestContext;

/// Request to create a new folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[serde(default)]
    pub name: Option<String>,
    /// Parent folder ID (None for root-level).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Manages the folder lifecycle. Every operation is owner-scoped.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Object store holding the bytes of files inside purged folders.
    storage: Arc<dyn StorageProvider>,
}

fn folder_not_found() -> AppError {
    AppError::not_found("Folder not found.")
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<dyn FolderStore>, storage: Arc<dyn StorageProvider>) -> Self {
        Self { folders, storage }
    }

    /// Creates a folder at the root or under an active folder the caller owns.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = req
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation("Folder name is required."))?
            .to_string();

        if let Some(parent_id) = req.parent_id {
            let parent = self
                .folders
                .find_owned(parent_id, ctx.user_id)
                .await
                .map_err(|e| e.context("Failed to create folder."))?;
            if !parent.is_some_and(|p| !p.is_deleted) {
                return Err(folder_not_found());
            }
        }

        let folder = self
            .folders
            .create(CreateFolder {
                name,
                owner_id: ctx.user_id,
                parent_id: req.parent_id,
            })
            .await
            .map_err(|e| e.context("Failed to create folder."))?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder created"
        );
        Ok(folder)
    }

    /// Moves a folder to the trash.
    pub async fn trash_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let folder = self
            .folders
            .trash(folder_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to move folder to trash."))?
            .ok_or_else(folder_not_found)?;

        info!(user_id = %ctx.user_id, folder_id = %folder.id, "Folder trashed");
        Ok(folder)
    }

    /// Takes a folder out of the trash.
    pub async fn restore_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Folder> {
        let folder = self
            .folders
            .restore(folder_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to restore folder."))?
            .ok_or_else(folder_not_found)?;

        info!(user_id = %ctx.user_id, folder_id = %folder.id, "Folder restored");
        Ok(folder)
    }

    /// Permanently deletes a folder with everything below it.
    ///
    /// The store removes the rows atomically and hands back the object
    /// paths of the removed files. Objects that fail to delete are logged
    /// and left behind; the rows are already gone.
    pub async fn purge_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<usize> {
        let paths = self
            .folders
            .delete_permanently(folder_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to permanently delete folder."))?
            .ok_or_else(folder_not_found)?;

        let mut orphaned = 0;
        for path in &paths {
            if let Err(e) = self.storage.delete(path).await {
                orphaned += 1;
                warn!(
                    folder_id = %folder_id,
                    path = %path,
                    error = %e,
                    "Failed to delete object of purged folder"
                );
            }
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            files = paths.len(),
            orphaned,
            "Folder purged"
        );
        Ok(paths.len())
    }

    /// Path from the root down to the folder.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Vec<Breadcrumb>> {
        let trail = self
            .folders
            .breadcrumbs(folder_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to retrieve breadcrumbs."))?;
        if trail.is_empty() {
            return Err(folder_not_found());
        }
        Ok(trail)
    }
}
