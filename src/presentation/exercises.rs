use crate::domain::exercise::{CreateExercise, ExerciseFilter, UpdateExercise};
use crate::presentation::handlers::{AdminUser, ApiError, AppState, MessageResponse};
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

#[instrument(skip(state))]
pub async fn list_exercises(
    state: web::Data<AppState>,
    query: web::Query<ExerciseFilter>,
) -> Result<HttpResponse, ApiError> {
    let exercises = state.exercises.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(exercises))
}

#[instrument(skip(state, admin, req), fields(admin_id = %admin.0.user_id, name = %req.name))]
pub async fn create_exercise(
    state: web::Data<AppState>,
    admin: AdminUser,
    req: web::Json<CreateExercise>,
) -> Result<HttpResponse, ApiError> {
    let exercise = state.exercises.create(req.into_inner()).await.map_err(|e| {
        error!(error = %e, "Failed to create exercise");
        e
    })?;
    info!(exercise_id = %exercise.id, "Exercise created successfully");
    Ok(HttpResponse::Created().json(exercise))
}

#[instrument(skip(state), fields(exercise_id = %*path))]
pub async fn get_exercise(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let exercise = state.exercises.get(&path).await?;
    Ok(HttpResponse::Ok().json(exercise))
}

#[instrument(skip(state, admin, req), fields(admin_id = %admin.0.user_id, exercise_id = %*path))]
pub async fn update_exercise(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<UpdateExercise>,
) -> Result<HttpResponse, ApiError> {
    let exercise = state
        .exercises
        .update(&path, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update exercise");
            e
        })?;
    info!("Exercise updated successfully");
    Ok(HttpResponse::Ok().json(exercise))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.user_id, exercise_id = %*path))]
pub async fn delete_exercise(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.exercises.delete(&path).await?;
    info!("Exercise deleted successfully");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Exercise deleted")))
}
