//! # zenith-core
//!
//! Core crate for Zenith Drive. Contains configuration schemas, the
//! storage and event-publishing traits, domain events, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Zenith crates.

pub mod config;
pub mod error;
pub mod events;
#[cfg(feature = "axum")]
pub mod response;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
