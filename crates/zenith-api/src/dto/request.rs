//! Query-string DTOs.
//!
//! JSON bodies deserialize straight into the service request types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use zenith_core::error::AppError;

/// `GET /browse?folderId=`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseQuery {
    /// Parent folder; absent, empty or `null` means the root.
    #[serde(default)]
    pub folder_id: Option<String>,
}

impl BrowseQuery {
    /// The parent folder id, or `None` for the root.
    pub fn parent(&self) -> Result<Option<Uuid>, AppError> {
        parse_optional_id(self.folder_id.as_deref(), "Invalid folderId")
    }
}

/// `GET /search?q=`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query.
    #[serde(default)]
    pub q: Option<String>,
}

/// Parse an optional id sent as text, where `""` and `"null"` mean none.
pub fn parse_optional_id(raw: Option<&str>, message: &str) -> Result<Option<Uuid>, AppError> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(text) => Uuid::parse_str(text)
            .map(Some)
            .map_err(|_| AppError::validation(message)),
    }
}
