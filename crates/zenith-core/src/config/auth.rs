//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required at boot.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl(),
        }
    }
}

fn default_token_ttl() -> u64 {
    24
}
