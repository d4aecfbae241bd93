//! Folder lifecycle and breadcrumb handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::debug;
use uuid::Uuid;

use zenith_core::error::AppError;
use zenith_entity::folder::{Breadcrumb, Folder};
use zenith_service::folder::CreateFolderRequest;

use crate::dto::response::{MessageResponse, RecordResponse};
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// POST /folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<RecordResponse<Folder>>), AppError> {
    let folder = state.folder_service.create_folder(&auth, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordResponse::new(
            "Folder created successfully",
            "folder",
            folder,
        )),
    ))
}

/// DELETE /folders/{id}
pub async fn trash_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.folder_service.trash_folder(&auth, id).await?;
    Ok(Json(MessageResponse::new("Folder moved to trash.")))
}

/// PATCH /folders/{id}/restore
pub async fn restore_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<RecordResponse<Folder>>, AppError> {
    let folder = state.folder_service.restore_folder(&auth, id).await?;
    Ok(Json(RecordResponse::new(
        "Folder restored successfully",
        "folder",
        folder,
    )))
}

/// DELETE /folders/{id}/permanent
pub async fn purge_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let objects = state.folder_service.purge_folder(&auth, id).await?;
    debug!(folder_id = %id, objects, "Folder purged");
    Ok(Json(MessageResponse::new("Folder permanently deleted.")))
}

/// GET /folders/{id}/breadcrumbs
pub async fn breadcrumbs(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<Breadcrumb>>, AppError> {
    Ok(Json(state.folder_service.breadcrumbs(&auth, id).await?))
}
