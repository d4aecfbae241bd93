//! File sharing grants.

pub mod service;

pub use service::{ShareRequest, ShareService, UpdateRoleRequest};
