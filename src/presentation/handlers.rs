use crate::application::analytics_service::AnalyticsService;
use crate::application::auth_service::AuthService;
use crate::application::exercise_service::ExerciseService;
use crate::application::user_service::UserService;
use crate::application::workout_service::WorkoutService;
use crate::data::exercise_repository::InMemoryExerciseRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::data::workout_repository::InMemoryWorkoutRepository;
use crate::domain::error::DomainError;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub struct AppState {
    pub workouts: WorkoutService<InMemoryWorkoutRepository>,
    pub exercises: ExerciseService<InMemoryExerciseRepository>,
    pub analytics: AnalyticsService<InMemoryWorkoutRepository>,
    pub users: UserService<InMemoryUserRepository, InMemoryWorkoutRepository>,
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
}

impl AppState {
    /// Wires every service over fresh in-memory collections.
    pub fn in_memory(jwt_secret: String, token_ttl_secs: u64) -> Self {
        let workout_repository = Arc::new(InMemoryWorkoutRepository::new());
        let exercise_repository = Arc::new(InMemoryExerciseRepository::new());
        let user_repository = Arc::new(InMemoryUserRepository::new());

        Self {
            workouts: WorkoutService::new(workout_repository.clone()),
            exercises: ExerciseService::new(exercise_repository),
            analytics: AnalyticsService::new(workout_repository.clone()),
            users: UserService::new(user_repository.clone(), workout_repository),
            auth_service: Arc::new(AuthService::new(user_repository, jwt_secret, token_ttl_secs)),
        }
    }
}

// Uniform error response format
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: serde_json::Value,
}

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    /// The cause is logged, never sent to the client.
    #[error("Internal server error")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        match self {
            ApiError::Validation(_) => warn!(error = %error_msg, status = %status, "Validation error"),
            ApiError::NotFound(_) => warn!(error = %error_msg, status = %status, "Resource not found"),
            ApiError::Unauthorized(_) => warn!(error = %error_msg, status = %status, "Unauthorized"),
            ApiError::Forbidden(_) => warn!(error = %error_msg, status = %status, "Forbidden"),
            ApiError::Conflict(_) => warn!(error = %error_msg, status = %status, "Conflict"),
            ApiError::Internal(cause) => error!(cause = %cause, status = %status, "Internal error"),
        }

        HttpResponse::build(status).json(ErrorResponse {
            details: serde_json::json!({ "message": error_msg }),
            error: error_msg,
        })
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::WorkoutNotFound
            | DomainError::ExerciseNotFound
            | DomainError::UserNotFound => ApiError::NotFound(message),
            DomainError::InvalidWorkoutId
            | DomainError::InvalidExerciseId
            | DomainError::InvalidUserId
            | DomainError::Validation(_) => ApiError::Validation(message),
            DomainError::Conflict(_) => ApiError::Conflict(message),
            DomainError::Unauthorized(_) => ApiError::Unauthorized(message),
            DomainError::Forbidden(_) => ApiError::Forbidden(message),
            DomainError::Internal(cause) => ApiError::Internal(cause),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => domain.into(),
            Err(other) => ApiError::Internal(format!("{other:#}")),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string())))
    }
}

/// An authenticated caller holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(match user {
            Some(user) if user.actor().is_admin() => Ok(AdminUser(user)),
            Some(_) => Err(ApiError::Forbidden("Admin access required".to_string())),
            None => Err(ApiError::Unauthorized("User not authenticated".to_string())),
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
