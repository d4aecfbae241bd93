//! Convenience result type alias for Zenith Drive.

use crate::error::AppError;

/// A specialized `Result` type for Zenith operations.
pub type AppResult<T> = Result<T, AppError>;
