use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Workout not found")]
    WorkoutNotFound,
    #[error("Exercise not found")]
    ExerciseNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid workout ID")]
    InvalidWorkoutId,
    #[error("Invalid exercise ID")]
    InvalidExerciseId,
    #[error("Invalid user ID")]
    InvalidUserId,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
