//! Grant update and revocation handlers.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use zenith_core::error::AppError;
use zenith_entity::permission::Permission;
use zenith_service::share::UpdateRoleRequest;

use crate::dto::response::{MessageResponse, RecordResponse};
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// PATCH /permissions/{id}
pub async fn update_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateRoleRequest>,
) -> Result<Json<RecordResponse<Permission>>, AppError> {
    let permission = state
        .share_service
        .update_permission(&auth, id, req)
        .await?;

    Ok(Json(RecordResponse::new(
        "Permission updated successfully",
        "permission",
        permission,
    )))
}

/// DELETE /permissions/{id}
pub async fn revoke_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.share_service.revoke_permission(&auth, id).await?;
    Ok(Json(MessageResponse::new("Permission removed successfully.")))
}
