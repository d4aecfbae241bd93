//! Listings over the caller's files and folders.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use zenith_auth::acl::AclChecker;
use zenith_core::error::AppError;
use zenith_core::result::AppResult;
use zenith_database::store::{ContentStore, FileStore, FolderStore, StarStore};
use zenith_entity::file::RecentFile;
use zenith_entity::folder::Folder;
use zenith_entity::item::{Item, ItemLists};
use zenith_entity::permission::Role;

use super::search::to_tsquery;
use crate::context::RequestContext;

/// Page size of a folder listing.
pub const BROWSE_LIMIT: i64 = 100;
/// Number of entries in the recent-files listing.
pub const RECENT_LIMIT: i64 = 20;

/// Produces the merged folder/file listings.
#[derive(Debug, Clone)]
pub struct ContentService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    stars: Arc<dyn StarStore>,
    content: Arc<dyn ContentStore>,
    acl: AclChecker,
}

impl ContentService {
    /// Creates a new content service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        stars: Arc<dyn StarStore>,
        content: Arc<dyn ContentStore>,
        acl: AclChecker,
    ) -> Self {
        Self {
            folders,
            files,
            stars,
            content,
            acl,
        }
    }

    /// Immediate children of `folder_id` (root when `None`).
    pub async fn browse(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<ItemLists> {
        let items = self
            .content
            .user_content(ctx.user_id, folder_id, BROWSE_LIMIT, 0)
            .await
            .map_err(|e| e.context("Failed to retrieve content."))?;
        Ok(ItemLists::from_items(items))
    }

    /// Full-text search over the caller's non-trashed items.
    pub async fn search(&self, ctx: &RequestContext, query: &str) -> AppResult<ItemLists> {
        let tsquery = to_tsquery(query)?;
        debug!(user_id = %ctx.user_id, %tsquery, "Searching");

        let (files, folders) = tokio::try_join!(
            self.files.search(ctx.user_id, &tsquery),
            self.folders.search(ctx.user_id, &tsquery),
        )
        .map_err(|e| e.context("An error occurred during search."))?;

        let starred = self
            .starred_ids(ctx)
            .await
            .map_err(|e| e.context("An error occurred during search."))?;
        Ok(ItemLists {
            folders: mark(folders.into_iter().map(Item::folder), &starred),
            files: mark(files.into_iter().map(Item::file), &starred),
        })
    }

    /// The caller's trashed items, most recently trashed first.
    pub async fn trash(&self, ctx: &RequestContext) -> AppResult<ItemLists> {
        let load = async {
            let folders = self.folders.list_trashed(ctx.user_id).await?;
            let files = self.files.list_trashed(ctx.user_id).await?;
            let starred = self.starred_ids(ctx).await?;
            Ok::<_, AppError>(ItemLists {
                folders: mark(folders.into_iter().map(Item::folder), &starred),
                files: mark(files.into_iter().map(Item::file), &starred),
            })
        };
        load.await
            .map_err(|e| e.context("Failed to retrieve trashed items."))
    }

    /// The caller's starred items that are not in the trash, newest star
    /// first. Folders must be owned by the caller and files owned or
    /// shared with them; other starred ids are dropped.
    pub async fn starred(&self, ctx: &RequestContext) -> AppResult<ItemLists> {
        let load = async {
            let stars = self.stars.list_for_user(ctx.user_id).await?;
            if stars.is_empty() {
                return Ok::<_, AppError>(ItemLists::default());
            }

            // Both tables are searched with every id, so the recorded
            // resource type never hides a row.
            let ids: Vec<Uuid> = stars.iter().map(|s| s.resource_id).collect();
            let (folders, files) = tokio::try_join!(
                self.folders.find_active_by_ids(&ids),
                self.files.find_active_by_ids(&ids),
            )?;

            let folders: Vec<Folder> = folders
                .into_iter()
                .filter(|f| f.owner_id == ctx.user_id)
                .collect();
            let mut readable = Vec::with_capacity(files.len());
            for file in files {
                if self.acl.can_access_file(&file, ctx.user_id, Role::Viewer).await? {
                    readable.push(file);
                }
            }
            let files = readable;

            let mut by_id: HashMap<Uuid, Item> = folders
                .into_iter()
                .map(|f| (f.id, Item::folder(f).with_star(true)))
                .chain(
                    files
                        .into_iter()
                        .map(|f| (f.id, Item::file(f).with_star(true))),
                )
                .collect();

            Ok(ItemLists::from_items(
                stars.iter().filter_map(|s| by_id.remove(&s.resource_id)),
            ))
        };
        load.await
            .map_err(|e| e.context("Failed to fetch starred items."))
    }

    /// Recently updated files owned by or shared with the caller.
    pub async fn recent(&self, ctx: &RequestContext) -> AppResult<Vec<RecentFile>> {
        self.content
            .recent_files(ctx.user_id, RECENT_LIMIT)
            .await
            .map_err(|e| e.context("Failed to retrieve recent files."))
    }

    /// Items other users shared with the caller.
    pub async fn shared_with_me(&self, ctx: &RequestContext) -> AppResult<ItemLists> {
        let items = self
            .content
            .shared_content(ctx.user_id)
            .await
            .map_err(|e| e.context("Failed to retrieve shared content."))?;
        Ok(ItemLists::from_items(items))
    }

    async fn starred_ids(&self, ctx: &RequestContext) -> AppResult<HashSet<Uuid>> {
        Ok(self
            .stars
            .list_for_user(ctx.user_id)
            .await?
            .into_iter()
            .map(|s| s.resource_id)
            .collect())
    }
}

fn mark(items: impl Iterator<Item = Item>, starred: &HashSet<Uuid>) -> Vec<Item> {
    items
        .map(|item| {
            let is_starred = starred.contains(&item.id());
            item.with_star(is_starred)
        })
        .collect()
}
