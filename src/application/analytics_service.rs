use crate::analytics::{
    HeatmapCell, PersonalRecord, TimeRange, TrainingInsights, WorkoutMetrics,
    generate_training_insights, generate_workout_metrics, map_workouts_to_heatmap,
    personal_records,
};
use crate::domain::id::RecordId;
use crate::domain::repository::WorkoutRepository;
use crate::domain::workout::{Workout, WorkoutFilter};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Loads a user's history and runs the analytics derivations over it.
pub struct AnalyticsService<R: WorkoutRepository> {
    repository: Arc<R>,
}

impl<R: WorkoutRepository> AnalyticsService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn metrics(&self, user_id: RecordId, range: TimeRange) -> Result<WorkoutMetrics> {
        self.metrics_on(user_id, range, Utc::now().date_naive()).await
    }

    #[instrument(skip(self))]
    pub async fn metrics_on(
        &self,
        user_id: RecordId,
        range: TimeRange,
        today: NaiveDate,
    ) -> Result<WorkoutMetrics> {
        let workouts = self.history(user_id).await?;
        Ok(generate_workout_metrics(&workouts, range, today))
    }

    pub async fn insights(&self, user_id: RecordId) -> Result<Option<TrainingInsights>> {
        let workouts = self.history(user_id).await?;
        Ok(generate_training_insights(&workouts))
    }

    pub async fn heatmap(&self, user_id: RecordId, filter: WorkoutFilter) -> Result<Vec<HeatmapCell>> {
        let workouts: Vec<Workout> = self
            .history(user_id)
            .await?
            .into_iter()
            .filter(|w| filter.matches(w))
            .collect();
        Ok(map_workouts_to_heatmap(&workouts))
    }

    pub async fn records(&self, user_id: RecordId) -> Result<Vec<PersonalRecord>> {
        let workouts = self.history(user_id).await?;
        Ok(personal_records(&workouts))
    }

    async fn history(&self, user_id: RecordId) -> Result<Vec<Workout>> {
        let workouts = self.repository.find_by_user(user_id).await?;
        debug!(user_id = %user_id, count = workouts.len(), "Loaded workout history");
        Ok(workouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::workout_repository::InMemoryWorkoutRepository;
    use crate::domain::workout::{ExerciseEntry, SetEntry, WorkoutInput};

    async fn seeded(user_id: RecordId, days: &[NaiveDate]) -> AnalyticsService<InMemoryWorkoutRepository> {
        let repo = Arc::new(InMemoryWorkoutRepository::new());
        for &date in days {
            let workout = Workout::from_input(
                RecordId::generate(),
                user_id,
                WorkoutInput {
                    date: Some(date),
                    exercises: vec![ExerciseEntry {
                        name: "Squat".to_string(),
                        sets: vec![SetEntry::new(100.0, 5)],
                    }],
                    bodyweight: None,
                    notes: None,
                    image: None,
                },
            );
            repo.save(workout).await.unwrap();
        }
        AnalyticsService::new(repo)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[tokio::test]
    async fn test_metrics_only_see_the_users_history() {
        let alice = RecordId::generate();
        let service = seeded(alice, &[day(10), day(11)]).await;

        let metrics = service.metrics_on(alice, TimeRange::SevenDays, day(11)).await.unwrap();
        assert_eq!(metrics.workout_count, 2);
        assert_eq!(metrics.current_streak, 2);

        let stranger = service
            .metrics_on(RecordId::generate(), TimeRange::SevenDays, day(11))
            .await
            .unwrap();
        assert_eq!(stranger.workout_count, 0);
    }

    #[tokio::test]
    async fn test_insights_absent_without_history() {
        let service = seeded(RecordId::generate(), &[]).await;
        assert!(service.insights(RecordId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_heatmap_respects_date_filter() {
        let alice = RecordId::generate();
        let service = seeded(alice, &[day(1), day(5), day(9)]).await;

        let cells = service
            .heatmap(
                alice,
                WorkoutFilter {
                    from: Some(day(4)),
                    to: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].date, day(5));

        let records = service.records(alice).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight, 100.0);
    }
}
