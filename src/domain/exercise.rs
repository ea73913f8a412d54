use crate::domain::error::DomainError;
use crate::domain::id::RecordId;
use crate::domain::validation::{require_non_blank, validate_image};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    FullBody,
    Cardio,
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Core => "core",
            MuscleGroup::FullBody => "full_body",
            MuscleGroup::Cardio => "cardio",
        };
        f.write_str(name)
    }
}

/// Catalog entry the workout log picks exercises from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: RecordId,
    pub name: String,
    pub muscle: MuscleGroup,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    pub fn new(id: RecordId, req: CreateExercise) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: req.name.trim().to_string(),
            muscle: req.muscle,
            image: req.image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UpdateExercise) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(muscle) = update.muscle {
            self.muscle = muscle;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    pub muscle: MuscleGroup,
    #[serde(default)]
    pub image: Option<String>,
}

impl CreateExercise {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_blank(&self.name, "Exercise name is required")?;
        validate_image(self.image.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExercise {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub muscle: Option<MuscleGroup>,
    #[serde(default)]
    pub image: Option<String>,
}

impl UpdateExercise {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            require_non_blank(name, "Exercise name is required")?;
        }
        validate_image(self.image.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ExerciseFilter {
    pub muscle: Option<MuscleGroup>,
}

/// Catalog installed on an empty store at startup.
pub const DEFAULT_CATALOG: &[(&str, MuscleGroup)] = &[
    ("Bench Press", MuscleGroup::Chest),
    ("Back Squat", MuscleGroup::Legs),
    ("Deadlift", MuscleGroup::Back),
    ("Overhead Press", MuscleGroup::Shoulders),
    ("Barbell Row", MuscleGroup::Back),
    ("Pull-up", MuscleGroup::Back),
    ("Barbell Curl", MuscleGroup::Arms),
    ("Plank", MuscleGroup::Core),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn bench() -> CreateExercise {
        CreateExercise {
            name: "  Bench Press ".to_string(),
            muscle: MuscleGroup::Chest,
            image: None,
        }
    }

    #[test]
    fn test_new_trims_name() {
        let exercise = Exercise::new(RecordId::generate(), bench());
        assert_eq!(exercise.name, "Bench Press");
        assert_eq!(exercise.muscle, MuscleGroup::Chest);
    }

    #[test]
    fn test_create_requires_name_and_valid_image() {
        let mut req = bench();
        req.name = " ".to_string();
        assert_eq!(req.validate().unwrap_err().to_string(), "Exercise name is required");

        let mut req = bench();
        req.image = Some("bench.bmp".to_string());
        assert_eq!(
            req.validate().unwrap_err().to_string(),
            "Please provide a valid image URL"
        );
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut exercise = Exercise::new(RecordId::generate(), bench());
        exercise.apply(UpdateExercise {
            muscle: Some(MuscleGroup::Shoulders),
            ..Default::default()
        });
        assert_eq!(exercise.name, "Bench Press");
        assert_eq!(exercise.muscle, MuscleGroup::Shoulders);
        assert!(exercise.updated_at >= exercise.created_at);
    }

    #[test]
    fn test_muscle_group_wire_format() {
        assert_eq!(serde_json::to_string(&MuscleGroup::FullBody).unwrap(), "\"full_body\"");
        let parsed: MuscleGroup = serde_json::from_str("\"legs\"").unwrap();
        assert_eq!(parsed, MuscleGroup::Legs);
        assert!(serde_json::from_str::<MuscleGroup>("\"toes\"").is_err());
        assert_eq!(MuscleGroup::FullBody.to_string(), "full_body");
    }
}
