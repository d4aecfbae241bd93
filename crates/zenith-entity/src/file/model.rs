//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file's metadata row. The bytes live in object storage at `storage_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file name (including extension).
    pub name: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// The folder containing this file (null for root).
    pub folder_id: Option<Uuid>,
    /// Object storage key.
    pub storage_path: String,
    /// MIME type of the file.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size: Option<i64>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the file was moved to trash.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// The folder to place the file in.
    pub folder_id: Option<Uuid>,
    /// Object storage key.
    pub storage_path: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size: i64,
}

/// A row of the recent-files listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecentFile {
    /// File ID.
    pub id: Uuid,
    /// File name.
    pub name: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// File size in bytes.
    pub size: Option<i64>,
    /// Last update time, the ranking key.
    pub updated_at: DateTime<Utc>,
    /// Email of the file's owner.
    pub owner_name: String,
}
