//! Signed object downloads for the local and in-memory providers.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use zenith_core::error::AppError;

use crate::extractors::ApiPath;
use crate::state::AppState;

/// GET /objects/{token}
pub async fn download(
    State(state): State<AppState>,
    ApiPath(token): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let (data, content_type) = state.storage.open_signed(&token).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], data))
}
