//! Router-level tests over in-memory backends.

mod helpers;

mod auth_test;
mod content_test;
mod file_test;
mod share_test;
