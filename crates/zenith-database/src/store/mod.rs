//! Store traits consumed by the service layer.
//!
//! Every owner-scoped method takes the acting user's id and treats a
//! resource owned by someone else exactly like a missing one: `None`,
//! `false` or an empty list, never an authorization error.
//!
//! Uniqueness violations surface as [`ErrorKind::Conflict`](zenith_core::error::ErrorKind::Conflict).

pub mod bundle;

use async_trait::async_trait;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::file::{CreateFile, File, RecentFile};
use zenith_entity::folder::{Breadcrumb, CreateFolder, Folder};
use zenith_entity::item::Item;
use zenith_entity::permission::{CreatePermission, Permission, PermissionGrant, Role};
use zenith_entity::star::{CreateStar, Star};
use zenith_entity::user::{CreateUser, User};

pub use bundle::Stores;

/// User accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a user. A taken email is a conflict.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Look a user up by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Look a user up by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Folder rows.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a folder.
    async fn create(&self, data: CreateFolder) -> AppResult<Folder>;

    /// Find a folder owned by `owner_id`, trashed or not.
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>>;

    /// Fetch non-trashed folders by id, in no particular order.
    async fn find_active_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Folder>>;

    /// Set the soft-delete flag and stamp `deleted_at`.
    async fn trash(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>>;

    /// Clear the soft-delete flag and `deleted_at`.
    async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>>;

    /// All trashed folders of `owner_id`, most recently trashed first.
    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Full-text match of `tsquery` against non-trashed folder names.
    async fn search(&self, owner_id: Uuid, tsquery: &str) -> AppResult<Vec<Folder>>;

    /// Atomically delete the folder subtree.
    ///
    /// Returns `None` if the folder does not exist for `owner_id`, or the
    /// storage paths of every file row that was removed.
    async fn delete_permanently(&self, id: Uuid, owner_id: Uuid)
    -> AppResult<Option<Vec<String>>>;

    /// Path from the root down to the folder, inclusive. Empty when the
    /// folder does not exist for `owner_id`.
    async fn breadcrumbs(&self, id: Uuid, owner_id: Uuid) -> AppResult<Vec<Breadcrumb>>;
}

/// File metadata rows.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert file metadata.
    async fn create(&self, data: CreateFile) -> AppResult<File>;

    /// Find a file regardless of owner.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>>;

    /// Find a file owned by `owner_id`, trashed or not.
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>>;

    /// Fetch non-trashed files by id, in no particular order.
    async fn find_active_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<File>>;

    /// Set the soft-delete flag and stamp `deleted_at`.
    async fn trash(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>>;

    /// Clear the soft-delete flag and `deleted_at`.
    async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>>;

    /// Delete the metadata row and the stars pointing at it.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool>;

    /// All trashed files of `owner_id`, most recently trashed first.
    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>>;

    /// Full-text match of `tsquery` against non-trashed file names.
    async fn search(&self, owner_id: Uuid, tsquery: &str) -> AppResult<Vec<File>>;
}

/// File sharing grants.
#[async_trait]
pub trait PermissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a grant. An existing `(file, grantee)` pair is a conflict.
    async fn create(&self, data: CreatePermission) -> AppResult<Permission>;

    /// The grant held by `user_id` on `file_id`, if any.
    async fn find_for_user(&self, file_id: Uuid, user_id: Uuid) -> AppResult<Option<Permission>>;

    /// All grants on a file, joined with grantee email, oldest first.
    async fn list_for_file(&self, file_id: Uuid) -> AppResult<Vec<PermissionGrant>>;

    /// Change the role of a grant on a file owned by `owner_id`.
    async fn update_role(
        &self,
        id: Uuid,
        owner_id: Uuid,
        role: Role,
    ) -> AppResult<Option<Permission>>;

    /// Revoke a grant on a file owned by `owner_id`.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool>;
}

/// Per-user stars.
#[async_trait]
pub trait StarStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a star. An existing `(user, resource)` pair is a conflict.
    async fn create(&self, data: CreateStar) -> AppResult<Star>;

    /// Remove the user's star on a resource. Returns rows removed.
    async fn delete(&self, user_id: Uuid, resource_id: Uuid) -> AppResult<u64>;

    /// All stars of a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Star>>;
}

/// Aggregate listings computed by the store.
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Immediate non-trashed children of `parent_id` (root when `None`)
    /// owned by `user_id`, folders first, each decorated with `is_starred`.
    async fn user_content(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Item>>;

    /// Non-trashed files owned by or shared with `user_id`, most recently
    /// updated first.
    async fn recent_files(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<RecentFile>>;

    /// Non-trashed items shared with `user_id`, with owner email and role.
    async fn shared_content(&self, user_id: Uuid) -> AppResult<Vec<Item>>;
}
