//! File lifecycle operations after upload.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use uuid::Uuid;

use zenith_auth::acl::AclChecker;
use zenith_core::error::AppError;
use zenith_core::result::AppResult;
use zenith_core::traits::publisher::EventPublisher;
use zenith_core::traits::storage::StorageProvider;
use zenith_database::store::{FileStore, FolderStore};
use zenith_entity::file::File;
use zenith_entity::permission::Role;

use crate::context::RequestContext;

/// Manages file metadata together with the stored bytes.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File metadata store.
    pub(crate) files: Arc<dyn FileStore>,
    /// Folder store, for upload target checks.
    pub(crate) folders: Arc<dyn FolderStore>,
    /// Owner and grant checks.
    pub(crate) acl: AclChecker,
    /// Object store.
    pub(crate) storage: Arc<dyn StorageProvider>,
    /// Sink for `FileCreated` notifications.
    pub(crate) publisher: Arc<dyn EventPublisher>,
    /// Lifetime of shareable links.
    pub(crate) link_ttl: Duration,
}

pub(crate) fn file_not_found() -> AppError {
    AppError::not_found("File not found.")
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        acl: AclChecker,
        storage: Arc<dyn StorageProvider>,
        publisher: Arc<dyn EventPublisher>,
        link_ttl: Duration,
    ) -> Self {
        Self {
            files,
            folders,
            acl,
            storage,
            publisher,
            link_ttl,
        }
    }

    /// Moves a file to the trash.
    pub async fn trash_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .files
            .trash(file_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to move file to trash."))?
            .ok_or_else(file_not_found)?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "File trashed");
        Ok(file)
    }

    /// Takes a file out of the trash.
    pub async fn restore_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .files
            .restore(file_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to restore file."))?
            .ok_or_else(file_not_found)?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "File restored");
        Ok(file)
    }

    /// Permanently deletes a file: object first, then the metadata row.
    ///
    /// If the row delete fails after the object is gone, the orphaned row
    /// is logged and the error returned.
    pub async fn purge_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self
            .files
            .find_owned(file_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to permanently delete file."))?
            .ok_or_else(file_not_found)?;

        self.storage
            .delete(&file.storage_path)
            .await
            .map_err(|e| e.context("Failed to permanently delete file."))?;

        match self.files.delete(file.id, ctx.user_id).await {
            Ok(true) => {
                info!(user_id = %ctx.user_id, file_id = %file.id, "File purged");
                Ok(())
            }
            Ok(false) => Err(file_not_found()),
            Err(e) => {
                error!(
                    file_id = %file.id,
                    storage_path = %file.storage_path,
                    error = %e,
                    "Object deleted but metadata row remains"
                );
                Err(e.context("Failed to permanently delete file."))
            }
        }
    }

    /// Issues a time-limited download link.
    ///
    /// The owner and any grantee may request one. Trashed files have no
    /// link.
    pub async fn shareable_link(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<String> {
        let file = self
            .files
            .find_by_id(file_id)
            .await
            .map_err(|e| e.context("Failed to create shareable link."))?
            .filter(|f| !f.is_deleted)
            .ok_or_else(file_not_found)?;

        let allowed = self
            .acl
            .can_access_file(&file, ctx.user_id, Role::Viewer)
            .await
            .map_err(|e| e.context("Failed to create shareable link."))?;
        if !allowed {
            return Err(file_not_found());
        }

        self.storage
            .signed_url(&file.storage_path, file.mime_type.as_deref(), self.link_ttl)
            .await
            .map_err(|e| e.context("Failed to create shareable link."))
    }
}
