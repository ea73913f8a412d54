#![allow(dead_code)]

use fittrack_api::domain::user::CreateUser;
use fittrack_api::infrastructure::config::AdminSeed;
use fittrack_api::presentation::handlers::AppState;

pub const JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// State with the default catalog, one admin and one regular user.
/// Returns `(state, admin_token, user_token)`.
pub async fn seeded_state() -> (AppState, String, String) {
    let state = AppState::in_memory(JWT_SECRET.to_string(), 3600);
    state.exercises.seed_defaults().await.unwrap();

    let admin = state
        .auth_service
        .ensure_admin(&AdminSeed {
            name: "Coach".to_string(),
            email: "coach@example.com".to_string(),
            password: "coach-password".to_string(),
        })
        .await
        .unwrap();
    let admin_token = state.auth_service.issue_token(&admin).unwrap();

    let user = state
        .auth_service
        .register_user(CreateUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "alice-password".to_string(),
        })
        .await
        .unwrap();
    let user_token = state.auth_service.issue_token(&user).unwrap();

    (state, admin_token, user_token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
