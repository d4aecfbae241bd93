//! Auth handlers: signup, login, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use zenith_core::error::AppError;
use zenith_service::user::Credentials;

use crate::dto::response::{LoginResponse, ProfileResponse, SignupResponse, UserSummary};
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let user = state.user_service.signup(&req).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Credentials>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state.user_service.login(&req).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: outcome.token,
    }))
}

/// GET /profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ProfileResponse::from(user)))
}
