//! Star entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Discriminator between the two resource tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// A file.
    File,
    /// A folder.
    Folder,
}

impl ResourceType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = zenith_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            _ => Err(zenith_core::AppError::validation(format!(
                "Invalid resource type: '{s}'. Expected one of: file, folder"
            ))),
        }
    }
}

/// A user's star on a file or folder.
///
/// At most one row exists per `(user_id, resource_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Star {
    /// Unique star identifier.
    pub id: Uuid,
    /// The user who starred the resource.
    pub user_id: Uuid,
    /// The starred file or folder.
    pub resource_id: Uuid,
    /// Which table `resource_id` points into.
    pub resource_type: ResourceType,
    /// When the star was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a star.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStar {
    /// The acting user.
    pub user_id: Uuid,
    /// The starred resource.
    pub resource_id: Uuid,
    /// The resource's table.
    pub resource_type: ResourceType,
}
