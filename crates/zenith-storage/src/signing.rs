//! Expiring download links for providers without native presigning.
//!
//! A link is `{base_url}/objects/{token}` where the token is an HS256 JWT
//! carrying the object path and the content type to serve it with.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use zenith_core::error::AppError;
use zenith_core::result::AppResult;

/// Claims embedded in a signed object token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectClaims {
    /// Object path.
    sub: String,
    /// Content type to serve the object with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ct: Option<String>,
    iat: i64,
    exp: i64,
}

/// An object reference recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedObject {
    /// Object path within the provider.
    pub path: String,
    /// Content type recorded when the link was issued.
    pub content_type: Option<String>,
}

/// Issues and verifies signed object links.
#[derive(Clone)]
pub struct UrlSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    base_url: String,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UrlSigner {
    /// Create a signer that builds links under `base_url`.
    pub fn new(secret: &str, base_url: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a link to `path` that stops working after `ttl`.
    pub fn sign(&self, path: &str, content_type: Option<&str>, ttl: Duration) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = ObjectClaims {
            sub: path.to_string(),
            ct: content_type.map(str::to_string),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign object link: {e}")))?;

        Ok(format!("{}/objects/{token}", self.base_url))
    }

    /// Recover the object a token points at.
    ///
    /// Tampered, malformed and expired tokens are all reported as a
    /// missing object so links cannot be probed.
    pub fn verify(&self, token: &str) -> AppResult<SignedObject> {
        let data =
            decode::<ObjectClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    JwtErrorKind::ExpiredSignature => {
                        tracing::debug!("Rejected expired object link");
                    }
                    other => tracing::debug!(error = ?other, "Rejected invalid object link"),
                }
                AppError::not_found("Object not found")
            })?;

        Ok(SignedObject {
            path: data.claims.sub,
            content_type: data.claims.ct,
        })
    }
}
