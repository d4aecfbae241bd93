//! File upload, lifecycle, link and sharing handlers.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use uuid::Uuid;

use zenith_core::error::AppError;
use zenith_entity::file::File;
use zenith_entity::permission::{Permission, PermissionGrant};
use zenith_service::file::{UploadRequest, UploadedFile};
use zenith_service::share::ShareRequest;

use crate::dto::request::parse_optional_id;
use crate::dto::response::{MessageResponse, RecordResponse, SignedUrlResponse};
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// A body over the upload limit surfaces as 413, anything else as 400.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("File exceeds the maximum upload size.")
    } else {
        AppError::validation(format!("Multipart error: {}", e.body_text()))
    }
}

/// POST /files/upload (multipart: `file`, optional `folder_id`)
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<RecordResponse<File>>), AppError> {
    let mut req = UploadRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "folder_id" => {
                let text = field.text().await.map_err(multipart_error)?;
                req.folder_id = parse_optional_id(Some(&text), "Invalid folder_id")?;
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await.map_err(multipart_error)?;
                req.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let file = state.file_service.upload(&auth, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordResponse::new("File uploaded successfully", "file", file)),
    ))
}

/// DELETE /files/{id}
pub async fn trash_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.file_service.trash_file(&auth, id).await?;
    Ok(Json(MessageResponse::new("File moved to trash.")))
}

/// PATCH /files/{id}/restore
pub async fn restore_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<RecordResponse<File>>, AppError> {
    let file = state.file_service.restore_file(&auth, id).await?;
    Ok(Json(RecordResponse::new(
        "File restored successfully",
        "file",
        file,
    )))
}

/// DELETE /files/{id}/permanent
pub async fn purge_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.file_service.purge_file(&auth, id).await?;
    Ok(Json(MessageResponse::new("File permanently deleted.")))
}

/// GET /files/{id}/shareable-link
pub async fn shareable_link(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SignedUrlResponse>, AppError> {
    let signed_url = state.file_service.shareable_link(&auth, id).await?;
    Ok(Json(SignedUrlResponse { signed_url }))
}

/// POST /files/{id}/share
pub async fn share_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<ShareRequest>,
) -> Result<(StatusCode, Json<RecordResponse<Permission>>), AppError> {
    let permission = state.share_service.share_file(&auth, id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordResponse::new(
            "File shared successfully",
            "permission",
            permission,
        )),
    ))
}

/// GET /files/{id}/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<PermissionGrant>>, AppError> {
    Ok(Json(state.share_service.list_permissions(&auth, id).await?))
}
