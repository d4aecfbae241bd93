//! Storage provider implementations.

#[cfg(feature = "local")]
pub mod local;
pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "local")]
pub use local::LocalStorageProvider;
pub use memory::MemoryStorageProvider;
#[cfg(feature = "s3")]
pub use s3::S3StorageProvider;
