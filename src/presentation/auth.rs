use crate::domain::user::{CreateUser, LoginRequest};
use crate::presentation::handlers::{ApiError, AppState};
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<CreateUser>,
) -> Result<HttpResponse, ApiError> {
    info!("Registration request received");

    let user = state
        .auth_service
        .register_user(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            ApiError::from(e)
        })?;

    info!(user_id = %user.id, "User registered successfully");
    Ok(HttpResponse::Created().json(user.profile()))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let session = state.auth_service.login(req.into_inner()).await.map_err(|e| {
        error!(error = %e, "Failed to login");
        ApiError::from(e)
    })?;

    info!(user_id = %session.user.id, "Login successful");
    Ok(HttpResponse::Ok().json(session))
}
