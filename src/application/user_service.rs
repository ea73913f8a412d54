use crate::domain::error::DomainError;
use crate::domain::id::RecordId;
use crate::domain::repository::{UserRepository, WorkoutRepository};
use crate::domain::user::{Actor, Role, User, UserProfile};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Admin-side user management.
pub struct UserService<U: UserRepository, W: WorkoutRepository> {
    users: Arc<U>,
    workouts: Arc<W>,
}

impl<U: UserRepository, W: WorkoutRepository> UserService<U, W> {
    pub fn new(users: Arc<U>, workouts: Arc<W>) -> Self {
        Self { users, workouts }
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>> {
        let mut users = self.users.find_all_users().await?;
        users.sort_by_key(|u| (u.created_at, u.id));
        Ok(users.iter().map(User::profile).collect())
    }

    pub async fn get_user(&self, id: &str) -> Result<UserProfile> {
        Ok(self.load(id).await?.profile())
    }

    #[instrument(skip(self), fields(actor_id = %actor.user_id))]
    pub async fn set_role(&self, actor: Actor, id: &str, role: Role) -> Result<UserProfile> {
        let mut user = self.load(id).await?;
        if user.id == actor.user_id && role != Role::Admin {
            warn!("Admin attempted to demote themselves");
            return Err(DomainError::Forbidden("Admins cannot change their own role".to_string()).into());
        }
        user.role = role;
        if !self.users.update_user(user.clone()).await? {
            return Err(DomainError::UserNotFound.into());
        }
        info!(user_id = %user.id, role = ?role, "User role updated");
        Ok(user.profile())
    }

    /// Removes the account together with its workouts.
    #[instrument(skip(self), fields(actor_id = %actor.user_id))]
    pub async fn delete_user(&self, actor: Actor, id: &str) -> Result<()> {
        let user = self.load(id).await?;
        if user.id == actor.user_id {
            warn!("Admin attempted to delete their own account");
            return Err(DomainError::Forbidden("Admins cannot delete their own account".to_string()).into());
        }
        // The account goes first so its token stops working before the sweep.
        if !self.users.delete_user(user.id).await? {
            return Err(DomainError::UserNotFound.into());
        }
        let removed_workouts = self.workouts.delete_by_user(user.id).await?;
        info!(user_id = %user.id, removed_workouts, "User deleted");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<User> {
        let id: RecordId = id.parse().map_err(|_| DomainError::InvalidUserId)?;
        self.users
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound.into())
    }
}
