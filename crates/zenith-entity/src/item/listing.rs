//! Discriminated listing rows.

use serde::Serialize;
use uuid::Uuid;

use super::resource::Resource;
use crate::file::File;
use crate::folder::Folder;
use crate::permission::Role;
use crate::star::ResourceType;

/// A folder or file as it appears in a listing.
///
/// Serializes as the flattened record plus `type`, `item_id` and
/// `is_starred`, e.g. `{"id":..,"name":..,"type":"file","item_id":..,"is_starred":false}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    /// A folder row.
    Folder(ItemEntry<Folder>),
    /// A file row.
    File(ItemEntry<File>),
}

/// Record plus listing decorations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemEntry<T> {
    /// The underlying row.
    #[serde(flatten)]
    pub record: T,
    /// Same as the record ID; listing clients key on it.
    pub item_id: Uuid,
    /// Whether the viewing user starred the resource.
    pub is_starred: bool,
    /// Owner email, present in shared-with-me listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// Granted role, present in shared-with-me listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl<T: Resource> ItemEntry<T> {
    fn new(record: T) -> Self {
        Self {
            item_id: record.id(),
            record,
            is_starred: false,
            owner_name: None,
            role: None,
        }
    }
}

impl Item {
    /// Wrap a folder row.
    pub fn folder(folder: Folder) -> Self {
        Self::Folder(ItemEntry::new(folder))
    }

    /// Wrap a file row.
    pub fn file(file: File) -> Self {
        Self::File(ItemEntry::new(file))
    }

    /// The wrapped resource ID.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Folder(entry) => entry.item_id,
            Self::File(entry) => entry.item_id,
        }
    }

    /// Which table the item comes from.
    pub fn kind(&self) -> ResourceType {
        match self {
            Self::Folder(_) => ResourceType::Folder,
            Self::File(_) => ResourceType::File,
        }
    }

    /// Whether the viewing user starred the item.
    pub fn is_starred(&self) -> bool {
        match self {
            Self::Folder(entry) => entry.is_starred,
            Self::File(entry) => entry.is_starred,
        }
    }

    /// Set the star decoration.
    pub fn with_star(mut self, starred: bool) -> Self {
        match &mut self {
            Self::Folder(entry) => entry.is_starred = starred,
            Self::File(entry) => entry.is_starred = starred,
        }
        self
    }

    /// Set the shared-with-me decorations.
    pub fn with_share(mut self, owner_name: String, role: Role) -> Self {
        match &mut self {
            Self::Folder(entry) => {
                entry.owner_name = Some(owner_name);
                entry.role = Some(role);
            }
            Self::File(entry) => {
                entry.owner_name = Some(owner_name);
                entry.role = Some(role);
            }
        }
        self
    }
}

/// A listing split by resource type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemLists {
    /// Folder items.
    pub folders: Vec<Item>,
    /// File items.
    pub files: Vec<Item>,
}

impl ItemLists {
    /// Partition a mixed sequence, preserving relative order.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let (folders, files) = items
            .into_iter()
            .partition(|item| item.kind() == ResourceType::Folder);
        Self { folders, files }
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    /// Whether both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}
