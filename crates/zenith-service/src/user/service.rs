//! Account operations: signup, login, profile.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use zenith_auth::jwt::JwtEncoder;
use zenith_auth::password::PasswordHasher;
use zenith_core::error::{AppError, ErrorKind};
use zenith_core::result::AppResult;
use zenith_database::store::UserStore;
use zenith_entity::user::model::normalize_email;
use zenith_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Email and password as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Normalized email and raw password, or a validation error.
    fn require(&self) -> AppResult<(String, &str)> {
        let email = self
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty());
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::validation("Email and password are required.")),
        }
    }
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Signed bearer token.
    pub token: String,
}

/// Handles account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Token issuer.
    encoder: JwtEncoder,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, encoder: JwtEncoder) -> Self {
        Self {
            users,
            hasher,
            encoder,
        }
    }

    /// Registers a new account.
    pub async fn signup(&self, credentials: &Credentials) -> AppResult<User> {
        let (email, password) = credentials.require()?;
        let password_hash = self.hasher.hash_password(password)?;

        let user = self
            .users
            .create(CreateUser {
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Conflict => AppError::conflict("User with this email already exists"),
                _ => e.context("An unexpected error occurred"),
            })?;

        info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Verifies credentials and issues a token.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<LoginOutcome> {
        let (email, password) = credentials.require()?;

        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| e.context("An unexpected error occurred"))?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            info!(user_id = %user.id, "Login rejected: bad password");
            return Err(AppError::authentication("Invalid credentials"));
        }

        let token = self.encoder.issue(&user)?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome { user, token })
    }

    /// Returns the caller's account.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to fetch user profile."))?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both_fields() {
        let missing = Credentials {
            email: Some("  ".to_string()),
            password: Some("pw".to_string()),
        };
        let err = missing.require().unwrap_err();
        assert_eq!(err.message, "Email and password are required.");

        let ok = Credentials {
            email: Some(" Ada@Example.COM ".to_string()),
            password: Some("pw".to_string()),
        };
        assert_eq!(ok.require().unwrap(), ("ada@example.com".to_string(), "pw"));
    }
}
