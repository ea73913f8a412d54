use crate::domain::error::DomainError;
use crate::domain::exercise::{CreateExercise, DEFAULT_CATALOG, Exercise, ExerciseFilter, UpdateExercise};
use crate::domain::id::RecordId;
use crate::domain::repository::ExerciseRepository;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct ExerciseService<R: ExerciseRepository> {
    repository: Arc<R>,
}

impl<R: ExerciseRepository> ExerciseService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, req), fields(name = %req.name, muscle = %req.muscle))]
    pub async fn create(&self, req: CreateExercise) -> Result<Exercise> {
        req.validate()?;
        let exercise = Exercise::new(RecordId::generate(), req);
        self.repository.save(exercise.clone()).await?;
        info!(exercise_id = %exercise.id, "Exercise added to catalog");
        Ok(exercise)
    }

    /// Catalog sorted by name, optionally narrowed to one muscle group.
    pub async fn list(&self, filter: ExerciseFilter) -> Result<Vec<Exercise>> {
        let mut exercises: Vec<Exercise> = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .filter(|e| filter.muscle.is_none_or(|m| e.muscle == m))
            .collect();
        exercises.sort_by_key(|e| e.name.to_lowercase());
        Ok(exercises)
    }

    pub async fn get(&self, id: &str) -> Result<Exercise> {
        let id = parse_id(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::ExerciseNotFound.into())
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: &str, update: UpdateExercise) -> Result<Exercise> {
        let mut exercise = self.get(id).await?;
        update.validate()?;
        exercise.apply(update);
        if !self.repository.update(exercise.clone()).await? {
            return Err(DomainError::ExerciseNotFound.into());
        }
        info!(exercise_id = %exercise.id, "Exercise updated");
        Ok(exercise)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        if !self.repository.delete(id).await? {
            return Err(DomainError::ExerciseNotFound.into());
        }
        info!(exercise_id = %id, "Exercise deleted");
        Ok(())
    }

    /// Installs the default catalog when the store is empty. Returns how many
    /// entries were added.
    pub async fn seed_defaults(&self) -> Result<usize> {
        if self.repository.count().await? > 0 {
            return Ok(0);
        }
        for (name, muscle) in DEFAULT_CATALOG {
            let exercise = Exercise::new(
                RecordId::generate(),
                CreateExercise {
                    name: name.to_string(),
                    muscle: *muscle,
                    image: None,
                },
            );
            self.repository.save(exercise).await?;
        }
        info!(count = DEFAULT_CATALOG.len(), "Default exercise catalog seeded");
        Ok(DEFAULT_CATALOG.len())
    }
}

fn parse_id(id: &str) -> Result<RecordId, DomainError> {
    id.parse().map_err(|_| DomainError::InvalidExerciseId)
}
