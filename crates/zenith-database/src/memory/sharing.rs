use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::permission::{CreatePermission, Grantee, Permission, PermissionGrant, Role};
use zenith_entity::star::{CreateStar, Star};

use super::{MemoryDatabase, Tables, duplicate, missing_reference};
use crate::store::{PermissionStore, StarStore};

impl Tables {
    /// Index of a grant whose file is owned by `owner_id`.
    fn owned_permission(&self, id: Uuid, owner_id: Uuid) -> Option<usize> {
        self.permissions.iter().position(|p| {
            p.id == id
                && self
                    .file(p.file_id)
                    .is_some_and(|f| f.owner_id == owner_id)
        })
    }
}

#[async_trait]
impl PermissionStore for MemoryDatabase {
    async fn create(&self, data: CreatePermission) -> AppResult<Permission> {
        let mut tables = self.tables.write().await;
        if tables.file(data.file_id).is_none() {
            return Err(missing_reference("permissions.file_id"));
        }
        if tables.user(data.user_id).is_none() {
            return Err(missing_reference("permissions.user_id"));
        }
        if tables
            .permissions
            .iter()
            .any(|p| p.file_id == data.file_id && p.user_id == data.user_id)
        {
            return Err(duplicate());
        }
        let permission = Permission {
            id: Uuid::new_v4(),
            file_id: data.file_id,
            user_id: data.user_id,
            role: data.role,
            created_at: Utc::now(),
        };
        tables.permissions.push(permission.clone());
        Ok(permission)
    }

    async fn find_for_user(&self, file_id: Uuid, user_id: Uuid) -> AppResult<Option<Permission>> {
        let tables = self.tables.read().await;
        Ok(tables
            .permissions
            .iter()
            .find(|p| p.file_id == file_id && p.user_id == user_id)
            .cloned())
    }

    async fn list_for_file(&self, file_id: Uuid) -> AppResult<Vec<PermissionGrant>> {
        let tables = self.tables.read().await;
        Ok(tables
            .permissions
            .iter()
            .filter(|p| p.file_id == file_id)
            .filter_map(|p| {
                tables.user(p.user_id).map(|u| PermissionGrant {
                    id: p.id,
                    role: p.role,
                    users: Grantee {
                        email: u.email.clone(),
                    },
                })
            })
            .collect())
    }

    async fn update_role(
        &self,
        id: Uuid,
        owner_id: Uuid,
        role: Role,
    ) -> AppResult<Option<Permission>> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables.owned_permission(id, owner_id) else {
            return Ok(None);
        };
        let permission = &mut tables.permissions[index];
        permission.role = role;
        Ok(Some(permission.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.owned_permission(id, owner_id) {
            Some(index) => {
                tables.permissions.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl StarStore for MemoryDatabase {
    async fn create(&self, data: CreateStar) -> AppResult<Star> {
        let mut tables = self.tables.write().await;
        if tables.user(data.user_id).is_none() {
            return Err(missing_reference("stars.user_id"));
        }
        if tables
            .stars
            .iter()
            .any(|s| s.user_id == data.user_id && s.resource_id == data.resource_id)
        {
            return Err(duplicate());
        }
        let star = Star {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            resource_id: data.resource_id,
            resource_type: data.resource_type,
            created_at: Utc::now(),
        };
        tables.stars.push(star.clone());
        Ok(star)
    }

    async fn delete(&self, user_id: Uuid, resource_id: Uuid) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.stars.len();
        tables
            .stars
            .retain(|s| !(s.user_id == user_id && s.resource_id == resource_id));
        Ok((before - tables.stars.len()) as u64)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Star>> {
        let tables = self.tables.read().await;
        Ok(tables
            .stars
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}
