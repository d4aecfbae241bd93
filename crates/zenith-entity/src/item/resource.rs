//! Fields shared by every trashable resource.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::file::File;
use crate::folder::Folder;
use crate::star::ResourceType;

/// Common view over [`Folder`] and [`File`].
pub trait Resource {
    /// Resource ID.
    fn id(&self) -> Uuid;
    /// Display name.
    fn name(&self) -> &str;
    /// Owning user.
    fn owner_id(&self) -> Uuid;
    /// Soft-delete flag.
    fn is_deleted(&self) -> bool;
    /// Deletion timestamp.
    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    /// Which table the resource belongs to.
    fn kind(&self) -> ResourceType;
    /// Move to trash at `at`. Re-trashing re-stamps the timestamp.
    fn mark_trashed(&mut self, at: DateTime<Utc>);
    /// Clear the soft-delete state.
    fn mark_restored(&mut self);
}

impl Resource for Folder {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn kind(&self) -> ResourceType {
        ResourceType::Folder
    }

    fn mark_trashed(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }

    fn mark_restored(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}

impl Resource for File {
    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn kind(&self) -> ResourceType {
        ResourceType::File
    }

    fn mark_trashed(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }

    fn mark_restored(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}
