//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `ZENITH__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod billing;
pub mod database;
pub mod logging;
pub mod realtime;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::billing::BillingConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::realtime::RealtimeConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (default.toml + environment overlay + env vars).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database backend settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Object storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Credential signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Payment provider settings.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Real-time WebSocket settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, an environment-specific overlay
    /// `config/{env}.toml`, and environment variables such as
    /// `ZENITH__AUTH__JWT_SECRET`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ZENITH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check that every secret the server cannot boot without is present.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut missing = Vec::new();

        if self.database.is_postgres() && self.database.url.trim().is_empty() {
            missing.push("database.url");
        }
        if self.auth.jwt_secret.trim().is_empty() {
            missing.push("auth.jwt_secret");
        }
        if self.billing.stripe_secret_key.trim().is_empty() {
            missing.push("billing.stripe_secret_key");
        }
        if self.billing.price_id.trim().is_empty() {
            missing.push("billing.price_id");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::configuration(format!(
                "Missing required configuration: {}",
                missing.join(", ")
            )))
        }
    }
}
