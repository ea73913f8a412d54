use crate::domain::error::DomainError;
use crate::domain::id::RecordId;
use crate::domain::validation::{require_non_blank, validate_image};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_NOTES_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub weight: f64,
    pub reps: u32,
}

impl SetEntry {
    pub fn new(weight: f64, reps: u32) -> Self {
        Self { weight, reps }
    }

    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub name: String,
    pub sets: Vec<SetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: RecordId,
    pub user_id: RecordId,
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseEntry>,
    pub total_reps: u64,
    pub total_weight: f64,
    pub bodyweight: Option<f64>,
    pub notes: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Builds a stored workout from a validated payload. Totals are derived here.
    pub fn from_input(id: RecordId, user_id: RecordId, input: WorkoutInput) -> Self {
        let now = Utc::now();
        let mut workout = Workout {
            id,
            user_id,
            date: input.date.unwrap_or_else(|| now.date_naive()),
            exercises: input.exercises,
            total_reps: 0,
            total_weight: 0.0,
            bodyweight: input.bodyweight,
            notes: input.notes,
            image: input.image,
            created_at: now,
            updated_at: now,
        };
        workout.recompute_totals();
        workout
    }

    /// Replaces the user-editable fields, keeping id, owner and creation time.
    pub fn apply(&mut self, input: WorkoutInput) {
        self.date = input.date.unwrap_or(self.date);
        self.exercises = input.exercises;
        self.bodyweight = input.bodyweight;
        self.notes = input.notes;
        self.image = input.image;
        self.updated_at = Utc::now();
        self.recompute_totals();
    }

    pub fn recompute_totals(&mut self) {
        let total_reps = self.sets().map(|set| u64::from(set.reps)).sum();
        let total_weight = self.sets().map(SetEntry::volume).sum();
        self.total_reps = total_reps;
        self.total_weight = total_weight;
    }

    pub fn sets(&self) -> impl Iterator<Item = &SetEntry> {
        self.exercises.iter().flat_map(|exercise| exercise.sets.iter())
    }
}

/// Create and replace payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutInput {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    #[serde(default)]
    pub bodyweight: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl WorkoutInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.exercises.is_empty() {
            return Err(invalid("At least one exercise is required"));
        }
        for exercise in &self.exercises {
            require_non_blank(&exercise.name, "Exercise name is required")?;
            if exercise.sets.is_empty() {
                return Err(invalid("At least one set is required"));
            }
            for set in &exercise.sets {
                if !set.weight.is_finite() || set.weight < 0.0 {
                    return Err(invalid("Weight cannot be negative"));
                }
                if set.reps < 1 {
                    return Err(invalid("Reps must be at least 1"));
                }
            }
        }
        if let Some(bodyweight) = self.bodyweight {
            if !bodyweight.is_finite() || bodyweight <= 0.0 {
                return Err(invalid("Bodyweight must be positive"));
            }
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_NOTES_LEN {
                return Err(invalid("Notes cannot exceed 1000 characters"));
            }
        }
        validate_image(self.image.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WorkoutFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl WorkoutFilter {
    pub fn matches(&self, workout: &Workout) -> bool {
        self.from.is_none_or(|from| workout.date >= from)
            && self.to.is_none_or(|to| workout.date <= to)
    }
}

fn invalid(message: &str) -> DomainError {
    DomainError::Validation(message.to_string())
}
