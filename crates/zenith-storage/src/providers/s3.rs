//! S3-compatible object storage provider (requires the `s3` feature).

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use zenith_core::config::storage::S3StorageConfig;
use zenith_core::error::{AppError, ErrorKind};
use zenith_core::result::AppResult;
use zenith_core::traits::storage::StorageProvider;

/// S3-compatible storage provider.
#[derive(Debug, Clone)]
pub struct S3StorageProvider {
    client: Client,
    bucket: String,
}

impl S3StorageProvider {
    /// Create a provider for the configured bucket.
    ///
    /// Empty access keys fall back to the default AWS credential chain.
    /// A custom endpoint (MinIO, Supabase, R2) switches to path-style
    /// addressing.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 storage provider"
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "zenith-config",
            ));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if !config.endpoint.is_empty() {
            builder = builder
                .endpoint_url(config.endpoint.clone())
                .force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl StorageProvider for S3StorageProvider {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|s| s.is_no_such_key()) {
                    AppError::not_found(format!("Object not found: {path}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to read object: {path}"),
                        e,
                    )
                }
            })?;

        let body = output.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read object body: {path}"),
                e,
            )
        })?;
        Ok(body.into_bytes())
    }

    async fn write(&self, path: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        let len = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .set_content_type(content_type.map(str::to_string))
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write object: {path}"),
                    e,
                )
            })?;

        debug!(path, bytes = len, "Wrote object");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object: {path}"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|s| s.is_not_found()) => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat object: {path}"),
                e,
            )),
        }
    }

    async fn signed_url(
        &self,
        path: &str,
        content_type: Option<&str>,
        ttl: Duration,
    ) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presigning lifetime", e)
        })?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .set_response_content_type(content_type.map(str::to_string))
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign object: {path}"),
                    e,
                )
            })?;

        Ok(request.uri().to_string())
    }
}
