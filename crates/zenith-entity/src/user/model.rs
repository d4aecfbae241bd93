//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::subscription::SubscriptionStatus;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email, unique and stored lower-cased.
    pub email: String,
    /// Argon2 password hash (never serialized to API responses).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Current subscription plan.
    pub subscription_status: SubscriptionStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Normalized email.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
}

/// Normalize an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
