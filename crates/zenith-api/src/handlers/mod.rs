//! HTTP request handlers grouped by domain.

pub mod auth;
pub mod billing;
pub mod content;
pub mod file;
pub mod folder;
pub mod health;
pub mod object;
pub mod permission;
pub mod star;
pub mod ws;
