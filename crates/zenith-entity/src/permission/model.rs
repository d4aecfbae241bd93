//! Permission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// A grant of access to one file for one user.
///
/// At most one row exists per `(file_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// The shared file.
    pub file_id: Uuid,
    /// The grantee.
    pub user_id: Uuid,
    /// Granted role.
    pub role: Role,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    /// The shared file.
    pub file_id: Uuid,
    /// The grantee.
    pub user_id: Uuid,
    /// Granted role.
    pub role: Role,
}

/// A grant as listed to the file owner, joined with the grantee's email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PermissionGrant {
    /// Permission ID.
    pub id: Uuid,
    /// Granted role.
    pub role: Role,
    /// The grantee.
    #[sqlx(flatten)]
    pub users: Grantee,
}

/// Grantee reference embedded in [`PermissionGrant`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Grantee {
    /// Grantee email.
    pub email: String,
}
