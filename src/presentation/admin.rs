use crate::domain::user::UpdateRole;
use crate::presentation::handlers::{AdminUser, ApiError, AppState, MessageResponse};
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

#[instrument(skip(state, admin), fields(admin_id = %admin.0.user_id))]
pub async fn list_users(
    state: web::Data<AppState>,
    admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let users = state.users.list_users().await?;
    info!(count = users.len(), "Users listed");
    Ok(HttpResponse::Ok().json(users))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.user_id, user_id = %*path))]
pub async fn get_user(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let profile = state.users.get_user(&path).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state, admin, req), fields(admin_id = %admin.0.user_id, user_id = %*path, role = ?req.role))]
pub async fn set_user_role(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<UpdateRole>,
) -> Result<HttpResponse, ApiError> {
    let profile = state
        .users
        .set_role(admin.0.actor(), &path, req.role)
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.user_id, user_id = %*path))]
pub async fn delete_user(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.users.delete_user(admin.0.actor(), &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted")))
}
