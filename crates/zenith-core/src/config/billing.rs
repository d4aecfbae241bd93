//! Payment provider configuration.

use serde::{Deserialize, Serialize};

/// Stripe checkout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Stripe secret API key. Required at boot.
    #[serde(default)]
    pub stripe_secret_key: String,
    /// Price identifier of the subscription plan. Required at boot.
    #[serde(default)]
    pub price_id: String,
    /// Stripe API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Redirect target after a completed checkout.
    #[serde(default = "default_success_url")]
    pub success_url: String,
    /// Redirect target after an abandoned checkout.
    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
    /// Request timeout for provider calls in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: String::new(),
            price_id: String::new(),
            api_base: default_api_base(),
            success_url: default_success_url(),
            cancel_url: default_cancel_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.stripe.com/v1".to_string()
}

fn default_success_url() -> String {
    "http://localhost:3000/dashboard?payment=success".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:3000/dashboard?payment=cancelled".to_string()
}

fn default_timeout() -> u64 {
    15
}
