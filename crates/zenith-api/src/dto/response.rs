//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use zenith_entity::user::{SubscriptionStatus, User};

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement carrying the affected record under `key`.
///
/// Serializes as `{"message": .., "<key>": ..}`.
#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse<T: Serialize> {
    /// Human-readable message.
    pub message: String,
    /// The record.
    #[serde(flatten)]
    pub record: std::collections::BTreeMap<&'static str, T>,
}

impl<T: Serialize> RecordResponse<T> {
    /// `{"message": message, key: record}`.
    pub fn new(message: impl Into<String>, key: &'static str, record: T) -> Self {
        Self {
            message: message.into(),
            record: std::collections::BTreeMap::from([(key, record)]),
        }
    }
}

/// Account summary returned by signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// `POST /signup` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Human-readable message.
    pub message: String,
    /// The new account.
    pub user: UserSummary,
}

/// `POST /login` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Human-readable message.
    pub message: String,
    /// Bearer token.
    pub token: String,
}

/// `GET /profile` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Plan.
    pub subscription_status: SubscriptionStatus,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            subscription_status: user.subscription_status,
        }
    }
}

/// `GET /files/{id}/shareable-link` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    /// Time-limited download URL.
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_response_puts_the_record_next_to_the_message() {
        let body = RecordResponse::new("File restored successfully", "file", 7);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"message": "File restored successfully", "file": 7}));
    }
}
