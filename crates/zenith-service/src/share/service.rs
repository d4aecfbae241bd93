//! Granting, listing, changing and revoking access to files.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use zenith_core::error::{AppError, ErrorKind};
use zenith_core::result::AppResult;
use zenith_database::store::{FileStore, PermissionStore, UserStore};
use zenith_entity::permission::{CreatePermission, Permission, PermissionGrant, Role};
use zenith_entity::user::model::normalize_email;

use crate::context::RequestContext;

/// Request to share a file with another user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareRequest {
    /// Grantee email.
    #[serde(default)]
    pub email: Option<String>,
    /// `viewer` or `editor`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Request to change the role of a grant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// `viewer` or `editor`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Manages sharing grants. Only a file's owner can see or change them.
#[derive(Debug, Clone)]
pub struct ShareService {
    files: Arc<dyn FileStore>,
    users: Arc<dyn UserStore>,
    permissions: Arc<dyn PermissionStore>,
}

fn unshareable() -> AppError {
    AppError::not_found("File not found or you do not have permission to share it.")
}

fn permission_not_found() -> AppError {
    AppError::not_found("Permission not found or you do not have access.")
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        files: Arc<dyn FileStore>,
        users: Arc<dyn UserStore>,
        permissions: Arc<dyn PermissionStore>,
    ) -> Self {
        Self {
            files,
            users,
            permissions,
        }
    }

    /// Grants `req.role` on a file to the user with `req.email`.
    ///
    /// The unique `(file, grantee)` constraint decides concurrent grants:
    /// one wins, the rest are conflicts.
    pub async fn share_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        req: ShareRequest,
    ) -> AppResult<Permission> {
        let email = req
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty());
        let role = req.role.as_deref().and_then(|r| r.parse::<Role>().ok());
        let (Some(email), Some(role)) = (email, role) else {
            return Err(AppError::validation("Valid email and role are required."));
        };

        self.files
            .find_owned(file_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to share file."))?
            .ok_or_else(unshareable)?;

        let grantee = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| e.context("Failed to share file."))?
            .ok_or_else(|| AppError::not_found(format!("User with email {email} not found.")))?;

        if grantee.id == ctx.user_id {
            return Err(AppError::validation("You cannot share a file with yourself."));
        }

        let permission = self
            .permissions
            .create(CreatePermission {
                file_id,
                user_id: grantee.id,
                role,
            })
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => {
                    AppError::conflict("This file is already shared with the user.")
                }
                _ => e.context("Failed to share file."),
            })?;

        info!(
            owner_id = %ctx.user_id,
            file_id = %file_id,
            grantee_id = %grantee.id,
            role = %role,
            "File shared"
        );
        Ok(permission)
    }

    /// All grants on a file the caller owns.
    pub async fn list_permissions(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> AppResult<Vec<PermissionGrant>> {
        self.files
            .find_owned(file_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to retrieve permissions."))?
            .ok_or_else(unshareable)?;

        self.permissions
            .list_for_file(file_id)
            .await
            .map_err(|e| e.context("Failed to retrieve permissions."))
    }

    /// Changes the role of a grant on a file the caller owns.
    pub async fn update_permission(
        &self,
        ctx: &RequestContext,
        permission_id: Uuid,
        req: UpdateRoleRequest,
    ) -> AppResult<Permission> {
        let role = req
            .role
            .as_deref()
            .and_then(|r| r.parse::<Role>().ok())
            .ok_or_else(|| AppError::validation("A valid role is required."))?;

        let permission = self
            .permissions
            .update_role(permission_id, ctx.user_id, role)
            .await
            .map_err(|e| e.context("Failed to update permission."))?
            .ok_or_else(permission_not_found)?;

        info!(
            owner_id = %ctx.user_id,
            permission_id = %permission.id,
            role = %role,
            "Permission updated"
        );
        Ok(permission)
    }

    /// Revokes a grant on a file the caller owns.
    pub async fn revoke_permission(
        &self,
        ctx: &RequestContext,
        permission_id: Uuid,
    ) -> AppResult<()> {
        let removed = self
            .permissions
            .delete(permission_id, ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to remove permission."))?;
        if !removed {
            return Err(permission_not_found());
        }

        info!(owner_id = %ctx.user_id, permission_id = %permission_id, "Permission revoked");
        Ok(())
    }
}
