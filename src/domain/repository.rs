use crate::domain::exercise::Exercise;
use crate::domain::id::RecordId;
use crate::domain::user::User;
use crate::domain::workout::Workout;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    async fn save(&self, workout: Workout) -> Result<()>;
    /// Overwrites a stored workout. Returns `false`, writing nothing, when it is gone.
    async fn update(&self, workout: Workout) -> Result<bool>;
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Workout>>;
    async fn find_all(&self) -> Result<Vec<Workout>>;
    async fn find_by_user(&self, user_id: RecordId) -> Result<Vec<Workout>>;
    /// Returns whether a workout was removed.
    async fn delete(&self, id: RecordId) -> Result<bool>;
    async fn delete_by_user(&self, user_id: RecordId) -> Result<usize>;
}

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    async fn save(&self, exercise: Exercise) -> Result<()>;
    async fn update(&self, exercise: Exercise) -> Result<bool>;
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Exercise>>;
    async fn find_all(&self) -> Result<Vec<Exercise>>;
    async fn delete(&self, id: RecordId) -> Result<bool>;
    async fn count(&self) -> Result<usize>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save_user(&self, user: User) -> Result<()>;
    /// Inserts unless another user already holds the email.
    async fn insert_user(&self, user: User) -> Result<bool>;
    async fn update_user(&self, user: User) -> Result<bool>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: RecordId) -> Result<Option<User>>;
    async fn find_all_users(&self) -> Result<Vec<User>>;
    async fn delete_user(&self, id: RecordId) -> Result<bool>;
}
