pub mod exercise_repository;
pub mod user_repository;
pub mod workout_repository;
