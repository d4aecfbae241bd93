//! Folder lifecycle and navigation.

pub mod service;

pub use service::{CreateFolderRequest, FolderService};
