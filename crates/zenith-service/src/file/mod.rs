//! File lifecycle: upload, trash, restore, purge, shareable links.

pub mod service;
pub mod upload;

pub use service::FileService;
pub use upload::{UploadRequest, UploadedFile};
