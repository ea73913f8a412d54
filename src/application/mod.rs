pub mod analytics_service;
pub mod auth_service;
pub mod exercise_service;
pub mod user_service;
pub mod workout_service;
