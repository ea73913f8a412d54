use crate::domain::workout::Workout;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Heaviest set ever logged for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
}

/// Workouts ordered by training day, then by when they were logged.
pub(crate) fn chronological(workouts: &[Workout]) -> Vec<&Workout> {
    let mut ordered: Vec<&Workout> = workouts.iter().collect();
    ordered.sort_by_key(|w| (w.date, w.created_at));
    ordered
}

/// One record per exercise name, grouped case-insensitively and sorted by name.
/// A record is beaten by a heavier set, or by more reps at the same weight.
pub fn personal_records(workouts: &[Workout]) -> Vec<PersonalRecord> {
    let mut best: HashMap<String, PersonalRecord> = HashMap::new();

    for workout in chronological(workouts) {
        for exercise in &workout.exercises {
            let key = exercise.name.trim().to_lowercase();
            for set in &exercise.sets {
                let candidate = PersonalRecord {
                    exercise: exercise.name.trim().to_string(),
                    weight: set.weight,
                    reps: set.reps,
                    date: workout.date,
                };
                match best.get_mut(&key) {
                    Some(current) => {
                        let heavier = set.weight > current.weight;
                        let more_reps = set.weight == current.weight && set.reps > current.reps;
                        if heavier || more_reps {
                            // Keep the spelling the exercise was first logged with.
                            current.weight = candidate.weight;
                            current.reps = candidate.reps;
                            current.date = candidate.date;
                        }
                    }
                    None => {
                        best.insert(key.clone(), candidate);
                    }
                }
            }
        }
    }

    let mut records: Vec<PersonalRecord> = best.into_values().collect();
    records.sort_by_key(|r| r.exercise.to_lowercase());
    records
}
