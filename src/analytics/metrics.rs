use crate::analytics::records::chronological;
use crate::analytics::{
    TimeRange, busiest_weekday, current_streak, in_period, round1, training_days,
};
use crate::domain::workout::Workout;
use chrono::{NaiveDate, Weekday};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalBest {
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
}

/// Summary cards shown above the dashboard charts for one time range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutMetrics {
    pub range: TimeRange,
    pub total_weight: f64,
    pub workout_count: usize,
    pub average_volume: f64,
    pub current_streak: u32,
    pub personal_best: Option<PersonalBest>,
    #[serde(serialize_with = "crate::analytics::weekday_name::serialize")]
    pub most_consistent_day: Option<Weekday>,
    /// Percent change in volume against the previous period of the same length.
    pub volume_change: f64,
}

pub fn generate_workout_metrics(
    workouts: &[Workout],
    range: TimeRange,
    today: NaiveDate,
) -> WorkoutMetrics {
    let current_bounds = range.current_period(today);
    let previous_bounds = range.previous_period(today);

    let current: Vec<&Workout> = chronological(workouts)
        .into_iter()
        .filter(|w| in_period(w, current_bounds))
        .collect();

    let total_weight: f64 = current.iter().map(|w| w.total_weight).sum();
    let previous_weight: f64 = workouts
        .iter()
        .filter(|w| in_period(w, previous_bounds))
        .map(|w| w.total_weight)
        .sum();

    let workout_count = current.len();
    let average_volume = if workout_count > 0 {
        round1(total_weight / workout_count as f64)
    } else {
        0.0
    };
    let volume_change = if previous_weight > 0.0 {
        round1((total_weight - previous_weight) / previous_weight * 100.0)
    } else {
        0.0
    };

    WorkoutMetrics {
        range,
        total_weight,
        workout_count,
        average_volume,
        current_streak: current_streak(&training_days(workouts), today),
        personal_best: heaviest_set(&current),
        most_consistent_day: busiest_weekday(current.iter().copied()),
        volume_change,
    }
}

/// Heaviest single set; the earliest one wins ties.
fn heaviest_set(workouts: &[&Workout]) -> Option<PersonalBest> {
    let mut best: Option<PersonalBest> = None;
    for workout in workouts {
        for exercise in &workout.exercises {
            for set in &exercise.sets {
                if best.as_ref().is_none_or(|b| set.weight > b.weight) {
                    best = Some(PersonalBest {
                        exercise: exercise.name.trim().to_string(),
                        weight: set.weight,
                        reps: set.reps,
                        date: workout.date,
                    });
                }
            }
        }
    }
    best
}
