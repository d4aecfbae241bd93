//! Storage manager: selects the configured provider and serves signed links.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use zenith_core::config::storage::StorageConfig;
use zenith_core::error::AppError;
use zenith_core::result::AppResult;
use zenith_core::traits::storage::StorageProvider;

use crate::mime::mime_from_name;
use crate::providers::MemoryStorageProvider;
use crate::signing::UrlSigner;

/// Handle to the active object store.
///
/// Cheap to clone. Implements [`StorageProvider`] by delegation so the
/// service layer only ever sees the trait.
#[derive(Debug, Clone)]
pub struct StorageManager {
    inner: Arc<dyn StorageProvider>,
    signer: UrlSigner,
}

impl StorageManager {
    /// Build the provider named by `config.provider`.
    ///
    /// `public_base_url` and `secret` configure the signer used for
    /// `/objects/{token}` links.
    pub async fn from_config(
        config: &StorageConfig,
        public_base_url: &str,
        secret: &str,
    ) -> AppResult<Self> {
        let signer = UrlSigner::new(secret, public_base_url);

        let inner: Arc<dyn StorageProvider> = match config.provider.as_str() {
            #[cfg(feature = "local")]
            "local" => Arc::new(
                crate::providers::LocalStorageProvider::new(
                    &config.local.root_path,
                    signer.clone(),
                )
                .await?,
            ),
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::providers::S3StorageProvider::new(&config.s3).await?),
            "memory" => Arc::new(MemoryStorageProvider::new(signer.clone())),
            other => {
                return Err(AppError::configuration(format!(
                    "Unsupported storage provider: {other}"
                )));
            }
        };

        info!(provider = inner.provider_type(), "Storage provider ready");
        Ok(Self { inner, signer })
    }

    /// Wrap an existing provider.
    pub fn from_provider(inner: Arc<dyn StorageProvider>, signer: UrlSigner) -> Self {
        Self { inner, signer }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.inner
    }

    /// Resolve a link token to the object bytes and content type.
    pub async fn open_signed(&self, token: &str) -> AppResult<(Bytes, String)> {
        let object = self.signer.verify(token)?;
        let data = self.inner.read_bytes(&object.path).await?;
        let content_type = object
            .content_type
            .or_else(|| mime_from_name(&object.path).map(str::to_string))
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Ok((data, content_type))
    }
}

#[async_trait]
impl StorageProvider for StorageManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(path).await
    }

    async fn write(&self, path: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        self.inner.write(path, data, content_type).await
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.inner.delete(path).await
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        self.inner.exists(path).await
    }

    async fn signed_url(
        &self,
        path: &str,
        content_type: Option<&str>,
        ttl: Duration,
    ) -> AppResult<String> {
        self.inner.signed_url(path, content_type, ttl).await
    }
}
