//! # zenith-entity
//!
//! Domain entity models for Zenith Drive. Every struct in this crate
//! represents a database table row, a stored-function result row, or a
//! listing value object. Database entities derive `sqlx::FromRow`.

pub mod file;
pub mod folder;
pub mod item;
pub mod permission;
pub mod star;
pub mod user;
