use crate::domain::exercise::Exercise;
use crate::domain::id::RecordId;
use crate::domain::repository::ExerciseRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryExerciseRepository {
    storage: Arc<RwLock<HashMap<RecordId, Exercise>>>,
}

impl InMemoryExerciseRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryExerciseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    #[instrument(skip(self, exercise), fields(exercise_id = %exercise.id, name = %exercise.name))]
    async fn save(&self, exercise: Exercise) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.insert(exercise.id, exercise);
        debug!("Exercise saved to memory storage");
        Ok(())
    }

    #[instrument(skip(self, exercise), fields(exercise_id = %exercise.id))]
    async fn update(&self, exercise: Exercise) -> Result<bool> {
        let mut storage = self.storage.write().await;
        let Some(slot) = storage.get_mut(&exercise.id) else {
            debug!("Exercise vanished before update");
            return Ok(false);
        };
        *slot = exercise;
        Ok(true)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Exercise>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Exercise>> {
        let storage = self.storage.read().await;
        Ok(storage.values().cloned().collect())
    }

    #[instrument(skip(self), fields(exercise_id = %id))]
    async fn delete(&self, id: RecordId) -> Result<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.storage.read().await.len())
    }
}
