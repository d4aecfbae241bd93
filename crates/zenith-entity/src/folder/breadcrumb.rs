//! Breadcrumb path segments.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One segment of the path from the root to a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Breadcrumb {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
}
