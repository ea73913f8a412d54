use crate::domain::id::RecordId;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<RecordId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn save_user(&self, user: User) -> Result<()> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;
        storage.insert(user.id, user);
        debug!("User saved to memory storage");
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn insert_user(&self, user: User) -> Result<bool> {
        let mut storage = self.storage.write().await;
        if storage.values().any(|u| u.email == user.email) {
            debug!("Email already taken");
            return Ok(false);
        }
        storage.insert(user.id, user);
        debug!("User inserted into memory storage");
        Ok(true)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_user(&self, user: User) -> Result<bool> {
        let mut storage = self.storage.write().await;
        match storage.get_mut(&user.id) {
            Some(slot) => {
                *slot = user;
                debug!("User updated");
                Ok(true)
            }
            None => {
                debug!("User vanished before update");
                Ok(false)
            }
        }
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.values().find(|u| u.email == email).cloned();
        match &user {
            Some(u) => debug!(user_id = %u.id, "User found in storage"),
            None => trace!("User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_user_by_id(&self, id: RecordId) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn find_all_users(&self) -> Result<Vec<User>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete_user(&self, id: RecordId) -> Result<bool> {
        let mut storage = self.storage.write().await;
        let removed = storage.remove(&id).is_some();
        debug!(removed, "User delete applied");
        Ok(removed)
    }
}
