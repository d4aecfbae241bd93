//! Checkout handler.

use axum::Json;
use axum::extract::State;

use zenith_core::error::AppError;
use zenith_service::billing::CheckoutSession;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /create-checkout-session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CheckoutSession>, AppError> {
    Ok(Json(state.billing_service.create_checkout(&auth).await?))
}
