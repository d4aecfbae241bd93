//! Checkout orchestration.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use zenith_core::error::AppError;
use zenith_core::result::AppResult;

use super::gateway::PaymentGateway;
use crate::context::RequestContext;

/// Redirect target of a created checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    /// Hosted checkout page.
    pub url: String,
}

/// Starts subscription checkouts.
#[derive(Debug, Clone)]
pub struct BillingService {
    gateway: Arc<dyn PaymentGateway>,
}

impl BillingService {
    /// Creates a new billing service.
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Creates a checkout session for the caller.
    ///
    /// Every provider failure is reported with the same message; the
    /// details go to the log.
    pub async fn create_checkout(&self, ctx: &RequestContext) -> AppResult<CheckoutSession> {
        match self.gateway.create_checkout_session(ctx.user_id).await {
            Ok(url) => {
                info!(user_id = %ctx.user_id, "Checkout session created");
                Ok(CheckoutSession { url })
            }
            Err(e) => {
                error!(user_id = %ctx.user_id, error = %e, "Checkout session failed");
                Err(AppError::external_service("Failed to create checkout session."))
            }
        }
    }
}
