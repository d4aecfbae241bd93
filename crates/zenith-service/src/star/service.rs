//! Starring and unstarring files and folders.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use zenith_core::error::{AppError, ErrorKind};
use zenith_core::result::AppResult;
use zenith_database::store::StarStore;
use zenith_entity::star::{CreateStar, ResourceType, Star};

use crate::context::RequestContext;

/// Request to star a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarRequest {
    /// The starred resource.
    #[serde(default)]
    pub resource_id: Option<Uuid>,
    /// `file` or `folder`.
    #[serde(default)]
    pub resource_type: Option<String>,
}

/// Request to remove a star.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstarRequest {
    /// The unstarred resource.
    #[serde(default)]
    pub resource_id: Option<Uuid>,
}

/// Manages the caller's stars. Starring needs no ownership.
#[derive(Debug, Clone)]
pub struct StarService {
    stars: Arc<dyn StarStore>,
}

impl StarService {
    /// Creates a new star service.
    pub fn new(stars: Arc<dyn StarStore>) -> Self {
        Self { stars }
    }

    /// Stars a resource for the caller.
    pub async fn star(&self, ctx: &RequestContext, req: StarRequest) -> AppResult<Star> {
        let resource_type = req
            .resource_type
            .as_deref()
            .and_then(|t| t.parse::<ResourceType>().ok());
        let (Some(resource_id), Some(resource_type)) = (req.resource_id, resource_type) else {
            return Err(AppError::validation(
                "resourceId and resourceType are required.",
            ));
        };

        let star = self
            .stars
            .create(CreateStar {
                user_id: ctx.user_id,
                resource_id,
                resource_type,
            })
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => AppError::conflict("Item is already starred."),
                _ => e.context("Failed to star item."),
            })?;

        info!(user_id = %ctx.user_id, resource_id = %resource_id, %resource_type, "Starred");
        Ok(star)
    }

    /// Removes the caller's star. Removing a missing star succeeds.
    pub async fn unstar(&self, ctx: &RequestContext, req: UnstarRequest) -> AppResult<u64> {
        let resource_id = req
            .resource_id
            .ok_or_else(|| AppError::validation("resourceId is required."))?;

        let removed = self
            .stars
            .delete(ctx.user_id, resource_id)
            .await
            .map_err(|e| e.context("Failed to unstar item."))?;

        info!(user_id = %ctx.user_id, resource_id = %resource_id, removed, "Unstarred");
        Ok(removed)
    }
}
