//! JSON body extractor whose rejection is an [`AppError`].

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use zenith_core::error::AppError;

/// `Json<T>` with failures rendered as `{error, message}` bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(ApiJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected JSON body");
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected a JSON body with Content-Type: application/json")
        }
        JsonRejection::JsonDataError(_) => AppError::validation("Invalid request body"),
        _ => AppError::validation("Malformed JSON body"),
    }
}
