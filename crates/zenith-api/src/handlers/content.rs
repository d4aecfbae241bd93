//! Listing handlers: browse, search, trash, recent, shared-with-me.

use axum::Json;
use axum::extract::{Query, State};

use zenith_core::error::AppError;
use zenith_entity::file::RecentFile;
use zenith_entity::item::ItemLists;

use crate::dto::request::{BrowseQuery, SearchQuery};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /browse?folderId=
pub async fn browse(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<ItemLists>, AppError> {
    let parent = query.parent()?;
    let lists = state.content_service.browse(&auth, parent).await?;
    Ok(Json(lists))
}

/// GET /search?q=
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ItemLists>, AppError> {
    let q = query.q.unwrap_or_default();
    let lists = state.content_service.search(&auth, &q).await?;
    Ok(Json(lists))
}

/// GET /trash
pub async fn trash(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ItemLists>, AppError> {
    Ok(Json(state.content_service.trash(&auth).await?))
}

/// GET /recent
pub async fn recent(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<RecentFile>>, AppError> {
    Ok(Json(state.content_service.recent(&auth).await?))
}

/// GET /shared-with-me
pub async fn shared_with_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ItemLists>, AppError> {
    Ok(Json(state.content_service.shared_with_me(&auth).await?))
}
