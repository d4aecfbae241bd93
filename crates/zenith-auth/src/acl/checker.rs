//! Owner and grant checks on files.

use std::sync::Arc;

use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_database::store::PermissionStore;
use zenith_entity::file::File;
use zenith_entity::permission::{Permission, Role};

/// Decides whether a user may act on a file.
///
/// The owner may do anything. Anyone else needs a grant whose role
/// covers `required`. Folders are owner-only and never reach this check.
#[derive(Debug, Clone)]
pub struct AclChecker {
    permissions: Arc<dyn PermissionStore>,
}

impl AclChecker {
    /// Creates a checker reading grants from `permissions`.
    pub fn new(permissions: Arc<dyn PermissionStore>) -> Self {
        Self { permissions }
    }

    /// Checks whether `user_id` holds at least `required` on `file`.
    pub async fn can_access_file(
        &self,
        file: &File,
        user_id: Uuid,
        required: Role,
    ) -> AppResult<bool> {
        if file.owner_id == user_id {
            return Ok(true);
        }
        let grant = self.permissions.find_for_user(file.id, user_id).await?;
        Ok(grant_allows(grant.as_ref(), required))
    }
}

/// Whether an optional grant covers the required role.
pub fn grant_allows(grant: Option<&Permission>, required: Role) -> bool {
    grant.is_some_and(|p| p.role.allows(required))
}
