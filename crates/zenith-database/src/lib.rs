//! # zenith-database
//!
//! Persistence for Zenith Drive. The store traits in [`store`] are the
//! seam the service layer depends on. [`repositories`] implements them
//! over PostgreSQL with sqlx, delegating cascades, breadcrumbs and the
//! aggregate listings to stored functions. [`memory`] implements them
//! in-process for development and tests.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::Stores;
