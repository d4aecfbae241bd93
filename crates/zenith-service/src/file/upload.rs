//! Single-request file upload with rollback of the stored object.

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use zenith_core::error::AppError;
use zenith_core::events::{DomainEvent, FileEvent};
use zenith_core::result::AppResult;
use zenith_entity::file::{CreateFile, File};
use zenith_entity::item::Item;
use zenith_storage::mime::mime_from_name;

use super::service::FileService;
use crate::context::RequestContext;

/// A file part received from a client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name as sent by the client.
    pub file_name: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

/// Upload parameters.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// The file part; `None` when the form carried no file.
    pub file: Option<UploadedFile>,
    /// Target folder (None for root).
    pub folder_id: Option<Uuid>,
}

/// Last path segment of a client-supplied name.
fn base_name(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim()
}

impl FileService {
    /// Stores the bytes, then the metadata row, then announces the file.
    ///
    /// If the row cannot be written, the object is deleted again and the
    /// row error is returned.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadRequest) -> AppResult<File> {
        let upload = req
            .file
            .ok_or_else(|| AppError::validation("No file uploaded."))?;
        let name = base_name(&upload.file_name).to_string();
        if name.is_empty() {
            return Err(AppError::validation("No file uploaded."));
        }

        if let Some(folder_id) = req.folder_id {
            let folder = self
                .folders
                .find_owned(folder_id, ctx.user_id)
                .await
                .map_err(|e| e.context("An error occurred during file upload."))?;
            if !folder.is_some_and(|f| !f.is_deleted) {
                return Err(AppError::not_found("Folder not found."));
            }
        }

        let mime_type = upload
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .or_else(|| mime_from_name(&name).map(str::to_string));
        let size = upload.data.len() as i64;
        let storage_path = format!(
            "{}/{}-{}",
            ctx.user_id,
            Utc::now().timestamp_millis(),
            name
        );

        self.storage
            .write(&storage_path, upload.data, mime_type.as_deref())
            .await
            .map_err(|e| e.context("An error occurred during file upload."))?;

        let created = self
            .files
            .create(CreateFile {
                name,
                owner_id: ctx.user_id,
                folder_id: req.folder_id,
                storage_path: storage_path.clone(),
                mime_type,
                size,
            })
            .await;

        let file = match created {
            Ok(file) => file,
            Err(e) => {
                match self.storage.delete(&storage_path).await {
                    Ok(()) => warn!(
                        storage_path = %storage_path,
                        error = %e,
                        "Metadata insert failed; stored object rolled back"
                    ),
                    Err(rollback) => error!(
                        storage_path = %storage_path,
                        error = %e,
                        rollback_error = %rollback,
                        "Metadata insert failed and object rollback failed"
                    ),
                }
                return Err(e.context("An error occurred during file upload."));
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            name = %file.name,
            size = size,
            "File uploaded"
        );

        self.announce(ctx, &file);
        Ok(file)
    }

    fn announce(&self, ctx: &RequestContext, file: &File) {
        let record = match serde_json::to_value(Item::file(file.clone())) {
            Ok(record) => record,
            Err(e) => {
                warn!(file_id = %file.id, error = %e, "Could not serialize file event");
                return;
            }
        };
        let event = DomainEvent::file(
            ctx.user_id,
            FileEvent::Created {
                file_id: file.id,
                owner_id: file.owner_id,
                record,
            },
        );
        let delivered = self.publisher.publish(&event);
        debug!(file_id = %file.id, delivered, "Published FileCreated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_drops_client_directories() {
        assert_eq!(base_name("report.pdf"), "report.pdf");
        assert_eq!(base_name("C:\\Users\\a\\report.pdf"), "report.pdf");
        assert_eq!(base_name("../../etc/passwd"), "passwd");
        assert_eq!(base_name("dir/"), "");
    }
}
