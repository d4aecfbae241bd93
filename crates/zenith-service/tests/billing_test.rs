//! Checkout session creation.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use zenith_core::error::{AppError, ErrorKind};
use zenith_core::result::AppResult;
use zenith_service::{BillingService, PaymentGateway, RequestContext};

#[derive(Debug)]
struct FixedGateway(Result<String, ErrorKind>);

#[async_trait]
impl PaymentGateway for FixedGateway {
    async fn create_checkout_session(&self, user_id: Uuid) -> AppResult<String> {
        match &self.0 {
            Ok(base) => Ok(format!("{base}?ref={user_id}")),
            Err(kind) => Err(AppError::new(*kind, "No such price: 'price_missing'")),
        }
    }
}

#[tokio::test]
async fn checkout_returns_the_provider_url() {
    let service = BillingService::new(Arc::new(FixedGateway(Ok(
        "https://checkout.stripe.com/c/pay/cs_test".to_string(),
    ))));
    let ctx = RequestContext::new(Uuid::new_v4(), "dana@example.com");

    let session = service.create_checkout(&ctx).await.unwrap();
    assert_eq!(
        session.url,
        format!("https://checkout.stripe.com/c/pay/cs_test?ref={}", ctx.user_id)
    );
}

#[tokio::test]
async fn provider_failures_share_one_message() {
    let service = BillingService::new(Arc::new(FixedGateway(Err(ErrorKind::ExternalService))));
    let ctx = RequestContext::new(Uuid::new_v4(), "dana@example.com");

    let err = service.create_checkout(&ctx).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
    assert_eq!(err.message, "Failed to create checkout session.");
}
