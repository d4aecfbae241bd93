//! Shared fixtures for service tests: in-memory backends and failing fakes.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use zenith_auth::{AclChecker, JwtEncoder, PasswordHasher};
use zenith_core::config::auth::AuthConfig;
use zenith_core::error::AppError;
use zenith_core::events::DomainEvent;
use zenith_core::result::AppResult;
use zenith_core::traits::publisher::EventPublisher;
use zenith_core::traits::storage::StorageProvider;
use zenith_database::memory::MemoryDatabase;
use zenith_database::store::{FileStore, Stores, UserStore};
use zenith_entity::file::{CreateFile, File};
use zenith_entity::user::CreateUser;
use zenith_service::file::{UploadRequest, UploadedFile};
use zenith_service::{
    ContentService, FileService, FolderService, RequestContext, ShareService, StarService,
    UserService,
};
use zenith_storage::UrlSigner;
use zenith_storage::providers::MemoryStorageProvider;

pub const LINK_TTL: Duration = Duration::from_secs(300);

/// Publisher that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: &DomainEvent) -> usize {
        self.events.lock().unwrap().push(event.clone());
        1
    }
}

/// Object store whose deletes always fail.
#[derive(Debug)]
pub struct DeleteFailingStorage {
    pub inner: MemoryStorageProvider,
}

#[async_trait]
impl StorageProvider for DeleteFailingStorage {
    fn provider_type(&self) -> &str {
        "delete-failing"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(path).await
    }

    async fn write(&self, path: &str, data: Bytes, content_type: Option<&str>) -> AppResult<()> {
        self.inner.write(path, data, content_type).await
    }

    async fn delete(&self, _path: &str) -> AppResult<()> {
        Err(AppError::storage("object store unavailable"))
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

/// File store whose inserts always fail; everything else hits `inner`.
#[derive(Debug)]
pub struct InsertFailingFiles {
    pub inner: Arc<MemoryDatabase>,
}

#[async_trait]
impl FileStore for InsertFailingFiles {
    async fn create(&self, _data: CreateFile) -> AppResult<File> {
        Err(AppError::database("Failed to create file"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        FileStore::find_by_id(self.inner.as_ref(), id).await
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        FileStore::find_owned(self.inner.as_ref(), id, owner_id).await
    }

    async fn find_active_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<File>> {
        FileStore::find_active_by_ids(self.inner.as_ref(), ids).await
    }

    async fn trash(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        FileStore::trash(self.inner.as_ref(), id, owner_id).await
    }

    async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        FileStore::restore(self.inner.as_ref(), id, owner_id).await
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        FileStore::delete(self.inner.as_ref(), id, owner_id).await
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        FileStore::list_trashed(self.inner.as_ref(), owner_id).await
    }

    async fn search(&self, owner_id: Uuid, tsquery: &str) -> AppResult<Vec<File>> {
        FileStore::search(self.inner.as_ref(), owner_id, tsquery).await
    }
}

/// File store that counts searches before delegating.
#[derive(Debug)]
pub struct CountingFiles {
    pub inner: Arc<MemoryDatabase>,
    pub searches: AtomicUsize,
}

impl CountingFiles {
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileStore for CountingFiles {
    async fn create(&self, data: CreateFile) -> AppResult<File> {
        FileStore::create(self.inner.as_ref(), data).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        FileStore::find_by_id(self.inner.as_ref(), id).await
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        FileStore::find_owned(self.inner.as_ref(), id, owner_id).await
    }

    async fn find_active_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<File>> {
        FileStore::find_active_by_ids(self.inner.as_ref(), ids).await
    }

    async fn trash(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        FileStore::trash(self.inner.as_ref(), id, owner_id).await
    }

    async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        FileStore::restore(self.inner.as_ref(), id, owner_id).await
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        FileStore::delete(self.inner.as_ref(), id, owner_id).await
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        FileStore::list_trashed(self.inner.as_ref(), owner_id).await
    }

    async fn search(&self, owner_id: Uuid, tsquery: &str) -> AppResult<Vec<File>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        FileStore::search(self.inner.as_ref(), owner_id, tsquery).await
    }
}

/// All services over one in-memory database and object store.
pub struct Harness {
    pub db: Arc<MemoryDatabase>,
    pub stores: Stores,
    pub storage: MemoryStorageProvider,
    pub publisher: Arc<RecordingPublisher>,
    pub users: UserService,
    pub content: ContentService,
    pub folders: FolderService,
    pub files: FileService,
    pub shares: ShareService,
    pub stars: StarService,
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 24,
    }
}

impl Harness {
    pub fn new() -> Self {
        let db = Arc::new(MemoryDatabase::new());
        let storage = MemoryStorageProvider::new(UrlSigner::new("test-secret", "http://localhost:8000"));
        Self::build(db, Arc::new(storage.clone()), storage, None)
    }

    /// Harness whose file service uses `files` and `object_store`.
    pub fn with_fakes(
        files: Option<Arc<dyn FileStore>>,
        object_store: Option<Arc<dyn StorageProvider>>,
        db: Arc<MemoryDatabase>,
    ) -> Self {
        let storage = MemoryStorageProvider::new(UrlSigner::new("test-secret", "http://localhost:8000"));
        let object_store = object_store.unwrap_or_else(|| Arc::new(storage.clone()));
        Self::build(db, object_store, storage, files)
    }

    fn build(
        db: Arc<MemoryDatabase>,
        object_store: Arc<dyn StorageProvider>,
        storage: MemoryStorageProvider,
        files: Option<Arc<dyn FileStore>>,
    ) -> Self {
        let mut stores = Stores::from_memory(db.clone());
        if let Some(files) = files {
            stores.files = files;
        }
        let publisher = Arc::new(RecordingPublisher::default());
        let config = auth_config();

        Self {
            users: UserService::new(
                stores.users.clone(),
                PasswordHasher::new(),
                JwtEncoder::new(&config),
            ),
            content: ContentService::new(
                stores.folders.clone(),
                stores.files.clone(),
                stores.stars.clone(),
                stores.content.clone(),
                AclChecker::new(stores.permissions.clone()),
            ),
            folders: FolderService::new(stores.folders.clone(), object_store.clone()),
            files: FileService::new(
                stores.files.clone(),
                stores.folders.clone(),
                AclChecker::new(stores.permissions.clone()),
                object_store,
                publisher.clone(),
                LINK_TTL,
            ),
            shares: ShareService::new(
                stores.files.clone(),
                stores.users.clone(),
                stores.permissions.clone(),
            ),
            stars: StarService::new(stores.stars.clone()),
            db,
            stores,
            storage,
            publisher,
        }
    }

    /// Create an account directly in the store and return its context.
    ///
    /// Skips password hashing; use [`UserService::signup`] when the
    /// password matters.
    pub async fn user(&self, email: &str) -> RequestContext {
        let user = self
            .stores
            .users
            .create(CreateUser {
                email: email.to_string(),
                password_hash: "unused".to_string(),
            })
            .await
            .unwrap();
        RequestContext::new(user.id, user.email)
    }

    /// Upload `data` as `name` into `folder_id`.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        name: &str,
        data: &'static [u8],
        folder_id: Option<Uuid>,
    ) -> File {
        self.files
            .upload(
                ctx,
                UploadRequest {
                    file: Some(UploadedFile {
                        file_name: name.to_string(),
                        content_type: None,
                        data: Bytes::from_static(data),
                    }),
                    folder_id,
                },
            )
            .await
            .unwrap()
    }
}
