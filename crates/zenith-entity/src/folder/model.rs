//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder ID (null for root-level folders).
    pub parent_id: Option<Uuid>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the folder was moved to trash.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this folder sits at the root of its owner's tree.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name, already trimmed.
    pub name: String,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
}
