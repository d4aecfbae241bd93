//! Core traits defined in `zenith-core` and implemented by other crates.

pub mod publisher;
pub mod storage;

pub use publisher::EventPublisher;
pub use storage::StorageProvider;
