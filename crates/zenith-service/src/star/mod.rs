//! Per-user stars.

pub mod service;

pub use service::{StarRequest, StarService, UnstarRequest};
