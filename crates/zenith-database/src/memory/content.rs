use async_trait::async_trait;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::file::RecentFile;
use zenith_entity::item::Item;

use super::MemoryDatabase;
use crate::store::ContentStore;

#[async_trait]
impl ContentStore for MemoryDatabase {
    async fn user_content(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Item>> {
        let tables = self.tables.read().await;

        let mut folders: Vec<_> = tables
            .folders
            .iter()
            .filter(|f| f.owner_id == user_id && !f.is_deleted && f.parent_id == parent_id)
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name));

        let mut files: Vec<_> = tables
            .files
            .iter()
            .filter(|f| f.owner_id == user_id && !f.is_deleted && f.folder_id == parent_id)
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let items = folders
            .into_iter()
            .map(|f| Item::folder(f.clone()).with_star(tables.is_starred(user_id, f.id)))
            .chain(
                files
                    .into_iter()
                    .map(|f| Item::file(f.clone()).with_star(tables.is_starred(user_id, f.id))),
            )
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok(items)
    }

    async fn recent_files(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<RecentFile>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<RecentFile> = tables
            .files
            .iter()
            .filter(|f| !f.is_deleted)
            .filter(|f| {
                f.owner_id == user_id
                    || tables
                        .permissions
                        .iter()
                        .any(|p| p.file_id == f.id && p.user_id == user_id)
            })
            .filter_map(|f| {
                tables.user(f.owner_id).map(|owner| RecentFile {
                    id: f.id,
                    name: f.name.clone(),
                    mime_type: f.mime_type.clone(),
                    size: f.size,
                    updated_at: f.updated_at,
                    owner_name: owner.email.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn shared_content(&self, user_id: Uuid) -> AppResult<Vec<Item>> {
        let tables = self.tables.read().await;
        let items = tables
            .permissions
            .iter()
            .rev()
            .filter(|p| p.user_id == user_id)
            .filter_map(|p| {
                let file = tables.file(p.file_id).filter(|f| !f.is_deleted)?;
                let owner = tables.user(file.owner_id)?;
                Some(
                    Item::file(file.clone())
                        .with_star(tables.is_starred(user_id, file.id))
                        .with_share(owner.email.clone(), p.role),
                )
            })
            .collect();
        Ok(items)
    }
}
