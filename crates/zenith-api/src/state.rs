//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use zenith_auth::{AclChecker, JwtDecoder, JwtEncoder, PasswordHasher};
use zenith_core::config::AppConfig;
use zenith_database::Stores;
use zenith_realtime::RealtimeEngine;
use zenith_service::{
    BillingService, ContentService, FileService, FolderService, PaymentGateway, ShareService,
    StarService, UserService,
};
use zenith_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Object storage and signed-link verification
    pub storage: Arc<StorageManager>,
    /// WebSocket connection registry and broadcaster
    pub realtime: Arc<RealtimeEngine>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Signup, login, profile
    pub user_service: Arc<UserService>,
    /// Browse, search, trash, stars, recent, shared listings
    pub content_service: Arc<ContentService>,
    /// Folder lifecycle
    pub folder_service: Arc<FolderService>,
    /// File upload and lifecycle
    pub file_service: Arc<FileService>,
    /// Sharing grants
    pub share_service: Arc<ShareService>,
    /// Stars
    pub star_service: Arc<StarService>,
    /// Checkout sessions
    pub billing_service: Arc<BillingService>,
}

impl AppState {
    /// Wires every service over the given backends.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        storage: StorageManager,
        realtime: RealtimeEngine,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let storage = Arc::new(storage);
        let realtime = Arc::new(realtime);
        let link_ttl = Duration::from_secs(config.storage.signed_url_ttl_seconds);

        let user_service = UserService::new(
            stores.users.clone(),
            PasswordHasher::new(),
            JwtEncoder::new(&config.auth),
        );
        let content_service = ContentService::new(
            stores.folders.clone(),
            stores.files.clone(),
            stores.stars.clone(),
            stores.content.clone(),
            AclChecker::new(stores.permissions.clone()),
        );
        let folder_service = FolderService::new(stores.folders.clone(), storage.clone());
        let file_service = FileService::new(
            stores.files.clone(),
            stores.folders.clone(),
            AclChecker::new(stores.permissions.clone()),
            storage.clone(),
            realtime.publisher(),
            link_ttl,
        );
        let share_service = ShareService::new(
            stores.files.clone(),
            stores.users.clone(),
            stores.permissions.clone(),
        );
        let star_service = StarService::new(stores.stars.clone());

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            storage,
            realtime,
            user_service: Arc::new(user_service),
            content_service: Arc::new(content_service),
            folder_service: Arc::new(folder_service),
            file_service: Arc::new(file_service),
            share_service: Arc::new(share_service),
            star_service: Arc::new(star_service),
            billing_service: Arc::new(BillingService::new(gateway)),
        }
    }
}
