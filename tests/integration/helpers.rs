//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use zenith_api::{AppState, build_app};
use zenith_auth::JwtEncoder;
use zenith_core::config::AppConfig;
use zenith_core::result::AppResult;
use zenith_database::Stores;
use zenith_database::memory::MemoryDatabase;
use zenith_database::store::UserStore;
use zenith_entity::user::CreateUser;
use zenith_realtime::RealtimeEngine;
use zenith_service::PaymentGateway;
use zenith_storage::providers::memory::MemoryStorageProvider;
use zenith_storage::{StorageManager, UrlSigner};

/// Shared signing secret for bearer tokens and object links.
pub const SECRET: &str = "integration-secret";

/// Multipart boundary used by [`multipart_body`].
const BOUNDARY: &str = "zenith-test-boundary";

/// Checkout gateway that answers with a fixed URL per user.
#[derive(Debug)]
pub struct FixedGateway;

#[async_trait]
impl PaymentGateway for FixedGateway {
    async fn create_checkout_session(&self, user_id: Uuid) -> AppResult<String> {
        Ok(format!("https://checkout.test/session/{user_id}"))
    }
}

/// A seeded account and its bearer token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

/// Test application context
pub struct TestApp {
    /// The full router, middleware included
    pub router: Router,
    /// Shared state, for reaching the connection registry
    pub state: AppState,
    /// Backing object store
    pub objects: MemoryStorageProvider,
    /// Public base URL that prefixes signed links
    pub base_url: String,
    encoder: JwtEncoder,
    db: Arc<MemoryDatabase>,
}

impl TestApp {
    /// Create a new test application over memory backends
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = SECRET.to_string();
        config.database.provider = "memory".to_string();
        config.storage.provider = "memory".to_string();
        config.billing.stripe_secret_key = "sk_test".to_string();
        config.billing.price_id = "price_test".to_string();

        let base_url = config.server.public_base_url.clone();
        let signer = UrlSigner::new(SECRET, &base_url);
        let objects = MemoryStorageProvider::new(signer.clone());
        let storage = StorageManager::from_provider(Arc::new(objects.clone()), signer);

        let db = Arc::new(MemoryDatabase::new());
        let stores = Stores::from_memory(db.clone());
        let realtime = RealtimeEngine::new(&config.realtime);
        let encoder = JwtEncoder::new(&config.auth);

        let state = AppState::new(config, stores, storage, realtime, Arc::new(FixedGateway));
        let router = build_app(state.clone());

        Self {
            router,
            state,
            objects,
            base_url,
            encoder,
            db,
        }
    }

    /// Seed an account without going through password hashing.
    pub async fn user(&self, email: &str) -> TestUser {
        let user = UserStore::create(
            self.db.as_ref(),
            CreateUser {
                email: email.to_string(),
                password_hash: "unused".to_string(),
            },
        )
        .await
        .unwrap();
        let token = self.encoder.issue(&user).unwrap();

        TestUser {
            id: user.id,
            email: user.email,
            token,
        }
    }

    /// Send a raw request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a JSON request and decode the JSON (or text) response.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        read_json(self.send(request).await).await
    }

    /// Multipart upload of `data` as `name`, optionally into `folder_id`.
    pub async fn upload(
        &self,
        token: &str,
        name: &str,
        data: &[u8],
        folder_id: Option<Uuid>,
    ) -> (StatusCode, Value) {
        let body = multipart_body(Some((name, data)), folder_id);
        self.upload_raw(token, body).await
    }

    /// Multipart upload of a pre-built body.
    pub async fn upload_raw(&self, token: &str, body: Vec<u8>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/files/upload")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        read_json(self.send(request).await).await
    }
}

/// Build a multipart form with an optional `file` part and `folder_id` field.
pub fn multipart_body(file: Option<(&str, &[u8])>, folder_id: Option<Uuid>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(folder_id) = folder_id {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Decode a response body as JSON, falling back to a JSON string.
pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}
