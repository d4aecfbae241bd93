//! User domain entities.

pub mod model;
pub mod subscription;

pub use model::{CreateUser, User};
pub use subscription::SubscriptionStatus;
