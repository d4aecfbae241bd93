//! In-memory storage provider used by the `memory` profile and tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use zenith_core::error::AppError;
use zenith_core::result::AppResult;
use zenith_core::traits::storage::StorageProvider;

use crate::signing::UrlSigner;

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: Option<String>,
}

/// Object store backed by a concurrent map.
#[derive(Debug, Clone)]
pub struct MemoryStorageProvider {
    objects: Arc<DashMap<String, StoredObject>>,
    signer: UrlSigner,
}

impl MemoryStorageProvider {
    /// Create an empty store issuing links with `signer`.
    pub fn new(signer: UrlSigner) -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            signer,
        }
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Content type recorded at write time.
    pub fn content_type(&self, path: &str) -> Option<String> {
        self.objects
            .get(path)
            .and_then(|o| o.content_type.clone())
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.objects
            .get(path)
            .map(|o| o.data.clone())
            .ok_or_else(|| AppError::not_found(format!("Object not found: {path}")))
    }

    async fn write(&self, path: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        self.objects.insert(
            path.to_string(),
            StoredObject {
                data,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.objects.remove(path);
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.objects.contains_key(path))
    }

    async fn signed_url(
        &self,
        path: &str,
        content_type: Option<&str>,
        ttl: Duration,
    ) -> AppResult<String> {
        self.signer.sign(path, content_type, ttl)
    }
}
