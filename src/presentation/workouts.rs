use crate::domain::workout::{WorkoutFilter, WorkoutInput};
use crate::presentation::handlers::{ApiError, AppState, MessageResponse};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn list_workouts(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<WorkoutFilter>,
) -> Result<HttpResponse, ApiError> {
    let workouts = state.workouts.list(user.actor(), query.into_inner()).await?;
    info!(count = workouts.len(), "Workouts retrieved");
    Ok(HttpResponse::Ok().json(workouts))
}

#[instrument(skip(state, user, req), fields(user_id = %user.user_id, workout_id))]
pub async fn create_workout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<WorkoutInput>,
) -> Result<HttpResponse, ApiError> {
    let workout = state
        .workouts
        .create(user.actor(), req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create workout");
            e
        })?;
    tracing::Span::current().record("workout_id", tracing::field::display(workout.id));
    info!(total_weight = workout.total_weight, "Workout created successfully");
    Ok(HttpResponse::Created().json(workout))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id, workout_id = %*path))]
pub async fn get_workout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let workout = state.workouts.get(user.actor(), &path).await?;
    Ok(HttpResponse::Ok().json(workout))
}

#[instrument(skip(state, user, req), fields(user_id = %user.user_id, workout_id = %*path))]
pub async fn update_workout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<WorkoutInput>,
) -> Result<HttpResponse, ApiError> {
    let workout = state
        .workouts
        .replace(user.actor(), &path, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update workout");
            e
        })?;
    info!(total_weight = workout.total_weight, "Workout updated successfully");
    Ok(HttpResponse::Ok().json(workout))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id, workout_id = %*path))]
pub async fn delete_workout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.workouts.delete(user.actor(), &path).await?;
    info!("Workout deleted successfully");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Workout deleted")))
}
