use crate::domain::id::RecordId;
use crate::domain::repository::WorkoutRepository;
use crate::domain::workout::Workout;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace};

#[derive(Clone)]
pub struct InMemoryWorkoutRepository {
    storage: Arc<RwLock<HashMap<RecordId, Workout>>>,
}

impl InMemoryWorkoutRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryWorkoutRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryWorkoutRepository {
    #[instrument(skip(self, workout), fields(workout_id = %workout.id, user_id = %workout.user_id))]
    async fn save(&self, workout: Workout) -> Result<()> {
        trace!("Acquiring write lock for workout storage");
        let mut storage = self.storage.write().await;
        storage.insert(workout.id, workout);
        debug!("Workout saved to memory storage");
        Ok(())
    }

    #[instrument(skip(self, workout), fields(workout_id = %workout.id))]
    async fn update(&self, workout: Workout) -> Result<bool> {
        let mut storage = self.storage.write().await;
        let Some(slot) = storage.get_mut(&workout.id) else {
            debug!("Workout vanished before update");
            return Ok(false);
        };
        *slot = workout;
        debug!("Workout updated in memory storage");
        Ok(true)
    }

    #[instrument(skip(self), fields(workout_id = %id))]
    async fn find_by_id(&self, id: RecordId) -> Result<Option<Workout>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Workout>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn find_by_user(&self, user_id: RecordId) -> Result<Vec<Workout>> {
        let storage = self.storage.read().await;
        let workouts: Vec<Workout> = storage
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        trace!(count = workouts.len(), "Workouts loaded for user");
        Ok(workouts)
    }

    #[instrument(skip(self), fields(workout_id = %id))]
    async fn delete(&self, id: RecordId) -> Result<bool> {
        let mut storage = self.storage.write().await;
        let removed = storage.remove(&id).is_some();
        debug!(removed, "Workout delete applied");
        Ok(removed)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn delete_by_user(&self, user_id: RecordId) -> Result<usize> {
        let mut storage = self.storage.write().await;
        let before = storage.len();
        storage.retain(|_, w| w.user_id != user_id);
        let removed = before - storage.len();
        debug!(removed, "Workouts removed for user");
        Ok(removed)
    }
}
