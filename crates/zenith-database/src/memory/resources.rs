use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::file::{CreateFile, File};
use zenith_entity::folder::{Breadcrumb, CreateFolder, Folder};
use zenith_entity::item::Resource;

use super::{MemoryDatabase, duplicate, matches_tsquery, missing_reference};
use crate::store::{FileStore, FolderStore};

/// Apply `change` to the row with `id` owned by `owner_id`.
fn update_owned<T: Resource + Clone>(
    rows: &mut [T],
    id: Uuid,
    owner_id: Uuid,
    change: impl FnOnce(&mut T),
) -> Option<T> {
    let row = rows
        .iter_mut()
        .find(|r| r.id() == id && r.owner_id() == owner_id)?;
    change(row);
    Some(row.clone())
}

/// Trashed rows of `owner_id`, most recently trashed first.
fn trashed<T: Resource + Clone>(rows: &[T], owner_id: Uuid) -> Vec<T> {
    let mut out: Vec<T> = rows
        .iter()
        .filter(|r| r.owner_id() == owner_id && r.is_deleted())
        .cloned()
        .collect();
    out.sort_by(|a, b| b.deleted_at().cmp(&a.deleted_at()));
    out
}

fn search<T: Resource + Clone>(rows: &[T], owner_id: Uuid, tsquery: &str) -> Vec<T> {
    let mut out: Vec<T> = rows
        .iter()
        .filter(|r| r.owner_id() == owner_id && !r.is_deleted())
        .filter(|r| matches_tsquery(r.name(), tsquery))
        .cloned()
        .collect();
    out.sort_by(|a, b| a.name().cmp(b.name()));
    out
}

fn active_by_ids<T: Resource + Clone>(rows: &[T], ids: &[Uuid]) -> Vec<T> {
    rows.iter()
        .filter(|r| !r.is_deleted() && ids.contains(&r.id()))
        .cloned()
        .collect()
}

#[async_trait]
impl FolderStore for MemoryDatabase {
    async fn create(&self, data: CreateFolder) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        if tables.user(data.owner_id).is_none() {
            return Err(missing_reference("folders.owner_id"));
        }
        if let Some(parent_id) = data.parent_id {
            if tables.folder(parent_id).is_none() {
                return Err(missing_reference("folders.parent_id"));
            }
        }
        let folder = Folder {
            id: Uuid::new_v4(),
            name: data.name,
            owner_id: data.owner_id,
            parent_id: data.parent_id,
            is_deleted: false,
            deleted_at: None,
            created_at: Utc::now(),
        };
        tables.folders.push(folder.clone());
        Ok(folder)
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        let tables = self.tables.read().await;
        Ok(tables.folder(id).filter(|f| f.owner_id == owner_id).cloned())
    }

    async fn find_active_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Folder>> {
        Ok(active_by_ids(&self.tables.read().await.folders, ids))
    }

    async fn trash(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        Ok(update_owned(&mut tables.folders, id, owner_id, |f| {
            f.mark_trashed(now)
        }))
    }

    async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        let mut tables = self.tables.write().await;
        Ok(update_owned(&mut tables.folders, id, owner_id, |f| {
            f.mark_restored()
        }))
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        Ok(trashed(&self.tables.read().await.folders, owner_id))
    }

    async fn search(&self, owner_id: Uuid, tsquery: &str) -> AppResult<Vec<Folder>> {
        Ok(search(&self.tables.read().await.folders, owner_id, tsquery))
    }

    async fn delete_permanently(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<Option<Vec<String>>> {
        let mut tables = self.tables.write().await;
        if !tables
            .folder(id)
            .is_some_and(|f| f.owner_id == owner_id)
        {
            return Ok(None);
        }

        let folder_ids: HashSet<Uuid> = tables.subtree(id).into_iter().collect();
        let mut file_ids = HashSet::new();
        let mut paths = Vec::new();
        tables.files.retain(|file| {
            let inside = file.folder_id.is_some_and(|f| folder_ids.contains(&f));
            if inside {
                file_ids.insert(file.id);
                paths.push(file.storage_path.clone());
            }
            !inside
        });
        tables
            .permissions
            .retain(|p| !file_ids.contains(&p.file_id));
        tables.stars.retain(|s| {
            !folder_ids.contains(&s.resource_id) && !file_ids.contains(&s.resource_id)
        });
        tables.folders.retain(|f| !folder_ids.contains(&f.id));

        Ok(Some(paths))
    }

    async fn breadcrumbs(&self, id: Uuid, owner_id: Uuid) -> AppResult<Vec<Breadcrumb>> {
        let tables = self.tables.read().await;
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = tables.folder(id).filter(|f| f.owner_id == owner_id);
        while let Some(folder) = cursor {
            if !seen.insert(folder.id) {
                break;
            }
            path.push(Breadcrumb {
                id: folder.id,
                name: folder.name.clone(),
            });
            cursor = folder.parent_id.and_then(|parent| tables.folder(parent));
        }
        path.reverse();
        Ok(path)
    }
}

#[async_trait]
impl FileStore for MemoryDatabase {
    async fn create(&self, data: CreateFile) -> AppResult<File> {
        let mut tables = self.tables.write().await;
        if tables.user(data.owner_id).is_none() {
            return Err(missing_reference("files.owner_id"));
        }
        if let Some(folder_id) = data.folder_id {
            if tables.folder(folder_id).is_none() {
                return Err(missing_reference("files.folder_id"));
            }
        }
        if tables
            .files
            .iter()
            .any(|f| f.storage_path == data.storage_path)
        {
            return Err(duplicate());
        }
        let now = Utc::now();
        let file = File {
            id: Uuid::new_v4(),
            name: data.name,
            owner_id: data.owner_id,
            folder_id: data.folder_id,
            storage_path: data.storage_path,
            mime_type: data.mime_type,
            size: Some(data.size),
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.files.push(file.clone());
        Ok(file)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        Ok(self.tables.read().await.file(id).cloned())
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        let tables = self.tables.read().await;
        Ok(tables.file(id).filter(|f| f.owner_id == owner_id).cloned())
    }

    async fn find_active_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<File>> {
        Ok(active_by_ids(&self.tables.read().await.files, ids))
    }

    async fn trash(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        Ok(update_owned(&mut tables.files, id, owner_id, |f| {
            f.mark_trashed(now)
        }))
    }

    async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<File>> {
        let mut tables = self.tables.write().await;
        Ok(update_owned(&mut tables.files, id, owner_id, |f| {
            f.mark_restored()
        }))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.files.len();
        tables
            .files
            .retain(|f| !(f.id == id && f.owner_id == owner_id));
        let deleted = tables.files.len() < before;
        if deleted {
            tables.permissions.retain(|p| p.file_id != id);
            tables.stars.retain(|s| s.resource_id != id);
        }
        Ok(deleted)
    }

    async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        Ok(trashed(&self.tables.read().await.files, owner_id))
    }

    async fn search(&self, owner_id: Uuid, tsquery: &str) -> AppResult<Vec<File>> {
        Ok(search(&self.tables.read().await.files, owner_id, tsquery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StarStore, UserStore};
    use zenith_entity::star::{CreateStar, ResourceType};
    use zenith_entity::user::CreateUser;

    async fn user(db: &MemoryDatabase, email: &str) -> Uuid {
        UserStore::create(
            db,
            CreateUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn folder(db: &MemoryDatabase, owner: Uuid, name: &str, parent: Option<Uuid>) -> Folder {
        FolderStore::create(
            db,
            CreateFolder {
                name: name.to_string(),
                owner_id: owner,
                parent_id: parent,
            },
        )
        .await
        .unwrap()
    }

    async fn file(db: &MemoryDatabase, owner: Uuid, name: &str, folder: Option<Uuid>) -> File {
        FileStore::create(
            db,
            CreateFile {
                name: name.to_string(),
                owner_id: owner,
                folder_id: folder,
                storage_path: format!("{owner}/{}-{name}", Uuid::new_v4()),
                mime_type: None,
                size: 1,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn purging_a_folder_removes_the_subtree_and_returns_paths() {
        let db = MemoryDatabase::new();
        let owner = user(&db, "owner@example.com").await;
        let root = folder(&db, owner, "Projects", None).await;
        let child = folder(&db, owner, "Drafts", Some(root.id)).await;
        let outside = folder(&db, owner, "Elsewhere", None).await;
        let a = file(&db, owner, "a.txt", Some(root.id)).await;
        let b = file(&db, owner, "b.txt", Some(child.id)).await;
        let kept = file(&db, owner, "c.txt", Some(outside.id)).await;
        StarStore::create(
            &db,
            CreateStar {
                user_id: owner,
                resource_id: b.id,
                resource_type: ResourceType::File,
            },
        )
        .await
        .unwrap();

        let mut paths = db.delete_permanently(root.id, owner).await.unwrap().unwrap();
        paths.sort();
        let mut expected = vec![a.storage_path, b.storage_path];
        expected.sort();
        assert_eq!(paths, expected);

        let counts = db.row_counts().await;
        assert_eq!(counts.folders, 1);
        assert_eq!(counts.files, 1);
        assert_eq!(counts.stars, 0);
        assert!(FileStore::find_by_id(&db, kept.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn purging_someone_elses_folder_reports_absence() {
        let db = MemoryDatabase::new();
        let owner = user(&db, "owner@example.com").await;
        let other = user(&db, "other@example.com").await;
        let root = folder(&db, owner, "Private", None).await;

        assert!(db.delete_permanently(root.id, other).await.unwrap().is_none());
        assert_eq!(db.row_counts().await.folders, 1);
    }

    #[tokio::test]
    async fn breadcrumbs_run_from_root_to_folder() {
        let db = MemoryDatabase::new();
        let owner = user(&db, "owner@example.com").await;
        let a = folder(&db, owner, "A", None).await;
        let b = folder(&db, owner, "B", Some(a.id)).await;
        let c = folder(&db, owner, "C", Some(b.id)).await;

        let names: Vec<String> = db
            .breadcrumbs(c.id, owner)
            .await
            .unwrap()
            .into_iter()
            .map(|crumb| crumb.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let stranger = user(&db, "stranger@example.com").await;
        assert!(db.breadcrumbs(c.id, stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn retrashing_restamps_the_deletion_time() {
        let db = MemoryDatabase::new();
        let owner = user(&db, "owner@example.com").await;
        let f = file(&db, owner, "a.txt", None).await;

        let first = FileStore::trash(&db, f.id, owner).await.unwrap().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = FileStore::trash(&db, f.id, owner).await.unwrap().unwrap();
        assert!(second.is_deleted);
        assert!(second.deleted_at > first.deleted_at);
    }
}
