//! # zenith-storage
//!
//! Object storage for file contents. Providers implement
//! [`StorageProvider`](zenith_core::traits::StorageProvider) for the local
//! filesystem, S3-compatible stores and an in-memory map. The
//! [`StorageManager`] selects one from configuration and verifies the
//! signed links that local and in-memory providers issue.

pub mod manager;
pub mod mime;
pub mod providers;
pub mod signing;

pub use manager::StorageManager;
pub use signing::{SignedObject, UrlSigner};
