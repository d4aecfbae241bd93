//! Storage provider trait for pluggable object storage backends.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for object storage backends.
///
/// Objects are addressed by an opaque path string such as
/// `"{owner_id}/{millis}-{name}"`. Implementations exist for the local
/// filesystem, S3, and an in-memory map. The trait is defined here in
/// `zenith-core` and implemented in `zenith-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read an object into memory. Missing objects are `NotFound`.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Write an object, replacing any existing content at `path`.
    async fn write(&self, path: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()>;

    /// Remove an object. Removing a missing object succeeds.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Issue a URL granting read access to `path` for `ttl`.
    async fn signed_url(
        &self,
        path: &str,
        content_type: Option<&str>,
        ttl: Duration,
    ) -> AppResult<String>;
}
