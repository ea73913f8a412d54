use crate::analytics::TimeRange;
use crate::domain::workout::WorkoutFilter;
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Default, Deserialize)]
pub struct MetricsQuery {
    #[serde(default)]
    pub range: TimeRange,
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn workout_metrics(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<MetricsQuery>,
) -> Result<HttpResponse, ApiError> {
    let metrics = state.analytics.metrics(user.user_id, query.range).await?;
    Ok(HttpResponse::Ok().json(metrics))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn training_insights(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let insights = state.analytics.insights(user.user_id).await?;
    Ok(HttpResponse::Ok().json(insights))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn workout_heatmap(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<WorkoutFilter>,
) -> Result<HttpResponse, ApiError> {
    let cells = state.analytics.heatmap(user.user_id, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cells))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn personal_records(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let records = state.analytics.records(user.user_id).await?;
    Ok(HttpResponse::Ok().json(records))
}
