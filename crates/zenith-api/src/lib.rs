//! # zenith-api
//!
//! HTTP API layer for Zenith Drive built on Axum.
//!
//! Provides all REST endpoints, the WebSocket upgrade, the signed object
//! download route, middleware (CORS, request logging), the bearer-token
//! extractor, and DTOs.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
