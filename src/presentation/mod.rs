pub mod admin;
pub mod analytics;
pub mod auth;
pub mod exercises;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod workouts;
