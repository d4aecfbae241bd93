//! Subscription checkout through the payment provider.

pub mod gateway;
pub mod service;

pub use gateway::{PaymentGateway, StripeGateway};
pub use service::{BillingService, CheckoutSession};
