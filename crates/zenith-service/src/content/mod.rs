//! Read-only listings: browse, search, trash, stars, recent, shared.

pub mod search;
pub mod service;

pub use search::to_tsquery;
pub use service::ContentService;
