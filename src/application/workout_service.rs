use crate::domain::error::DomainError;
use crate::domain::id::RecordId;
use crate::domain::repository::WorkoutRepository;
use crate::domain::user::Actor;
use crate::domain::workout::{Workout, WorkoutFilter, WorkoutInput};
use anyhow::Result;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct WorkoutService<R: WorkoutRepository> {
    repository: Arc<R>,
}

impl<R: WorkoutRepository> WorkoutService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, input), fields(user_id = %actor.user_id))]
    pub async fn create(&self, actor: Actor, input: WorkoutInput) -> Result<Workout> {
        input.validate()?;
        let workout = Workout::from_input(RecordId::generate(), actor.user_id, input);
        self.repository.save(workout.clone()).await?;
        info!(
            workout_id = %workout.id,
            total_reps = workout.total_reps,
            total_weight = workout.total_weight,
            "Workout logged"
        );
        Ok(workout)
    }

    /// The caller's own workouts, newest first.
    pub async fn list(&self, actor: Actor, filter: WorkoutFilter) -> Result<Vec<Workout>> {
        let mut workouts: Vec<Workout> = self
            .repository
            .find_by_user(actor.user_id)
            .await?
            .into_iter()
            .filter(|w| filter.matches(w))
            .collect();
        workouts.sort_by_key(|w| Reverse((w.date, w.created_at)));
        debug!(count = workouts.len(), "Workouts listed");
        Ok(workouts)
    }

    pub async fn get(&self, actor: Actor, id: &str) -> Result<Workout> {
        let id = parse_id(id)?;
        self.load_accessible(actor, id).await
    }

    #[instrument(skip(self, input), fields(user_id = %actor.user_id))]
    pub async fn replace(&self, actor: Actor, id: &str, input: WorkoutInput) -> Result<Workout> {
        let id = parse_id(id)?;
        input.validate()?;
        let mut workout = self.load_accessible(actor, id).await?;
        workout.apply(input);
        if !self.repository.update(workout.clone()).await? {
            return Err(DomainError::WorkoutNotFound.into());
        }
        info!(workout_id = %workout.id, total_weight = workout.total_weight, "Workout updated");
        Ok(workout)
    }

    #[instrument(skip(self), fields(user_id = %actor.user_id))]
    pub async fn delete(&self, actor: Actor, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        self.load_accessible(actor, id).await?;
        if !self.repository.delete(id).await? {
            return Err(DomainError::WorkoutNotFound.into());
        }
        info!(workout_id = %id, "Workout deleted");
        Ok(())
    }

    /// Someone else's workout looks exactly like a missing one.
    async fn load_accessible(&self, actor: Actor, id: RecordId) -> Result<Workout> {
        let workout = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::WorkoutNotFound)?;
        if !actor.can_access(workout.user_id) {
            warn!(workout_id = %id, "Workout requested by a non-owner");
            return Err(DomainError::WorkoutNotFound.into());
        }
        Ok(workout)
    }
}

fn parse_id(id: &str) -> Result<RecordId, DomainError> {
    id.parse().map_err(|_| DomainError::InvalidWorkoutId)
}
