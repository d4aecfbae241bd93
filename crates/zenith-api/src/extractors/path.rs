//! Path parameter extractor whose rejection is an [`AppError`].

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use zenith_core::error::AppError;

/// `Path<T>` with failures rendered as `{error, message}` bodies.
#[derive(Debug, Clone, Copy)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Rejected path parameter");
                Err(match rejection {
                    PathRejection::FailedToDeserializePathParams(_) => {
                        AppError::validation("Invalid id")
                    }
                    _ => AppError::internal("Missing path parameters"),
                })
            }
        }
    }
}
