//! Star handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use zenith_core::error::AppError;
use zenith_entity::item::ItemLists;
use zenith_entity::star::Star;
use zenith_service::star::{StarRequest, UnstarRequest};

use crate::dto::response::MessageResponse;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// GET /stars
pub async fn list_starred(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ItemLists>, AppError> {
    Ok(Json(state.content_service.starred(&auth).await?))
}

/// POST /stars
pub async fn star(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<StarRequest>,
) -> Result<(StatusCode, Json<Star>), AppError> {
    let star = state.star_service.star(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(star)))
}

/// DELETE /stars
pub async fn unstar(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UnstarRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state.star_service.unstar(&auth, req).await?;
    Ok(Json(MessageResponse::new("Item unstarred.")))
}
