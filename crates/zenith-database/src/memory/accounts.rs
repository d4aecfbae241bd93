use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use zenith_core::result::AppResult;
use zenith_entity::user::{CreateUser, SubscriptionStatus, User};

use super::{MemoryDatabase, duplicate};
use crate::store::UserStore;

#[async_trait]
impl UserStore for MemoryDatabase {
    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == data.email) {
            return Err(duplicate());
        }
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            password_hash: data.password_hash,
            subscription_status: SubscriptionStatus::Free,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}
