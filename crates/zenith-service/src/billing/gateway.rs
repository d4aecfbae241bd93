//! Payment provider clients.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use zenith_core::config::billing::BillingConfig;
use zenith_core::error::{AppError, ErrorKind};
use zenith_core::result::AppResult;

/// Creates hosted checkout sessions.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Start a subscription checkout for `user_id` and return the URL the
    /// client should be redirected to.
    async fn create_checkout_session(&self, user_id: Uuid) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct StripeSession {
    id: String,
    url: Option<String>,
}

/// Stripe Checkout over its form-encoded REST API.
#[derive(Debug, Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    config: BillingConfig,
}

impl StripeGateway {
    /// Creates a client for the configured Stripe account.
    pub fn new(config: BillingConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self { client, config })
    }

    fn session_form(&self, user_id: Uuid) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "subscription".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price]", self.config.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("client_reference_id", user_id.to_string()),
            ("success_url", self.config.success_url.clone()),
            ("cancel_url", self.config.cancel_url.clone()),
        ]
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(&self, user_id: Uuid) -> AppResult<String> {
        let endpoint = format!(
            "{}/checkout/sessions",
            self.config.api_base.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.config.stripe_secret_key)
            .form(&self.session_form(user_id))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Stripe request failed", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Stripe returned {status}: {body}"
            )));
        }

        let session: StripeSession = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Malformed Stripe response", e)
        })?;
        debug!(session_id = %session.id, "Stripe checkout session created");

        session
            .url
            .ok_or_else(|| AppError::external_service("Stripe session has no URL"))
    }
}
