use crate::presentation::admin::{delete_user, get_user, list_users, set_user_role};
use crate::presentation::analytics::{
    personal_records, training_insights, workout_heatmap, workout_metrics,
};
use crate::presentation::auth::{login, register};
use crate::presentation::exercises::{
    create_exercise, delete_exercise, get_exercise, list_exercises, update_exercise,
};
use crate::presentation::handlers::{ApiError, health_check};
use crate::presentation::middleware::JwtAuthMiddleware;
use crate::presentation::workouts::{
    create_workout, delete_workout, get_workout, list_workouts, update_workout,
};
use actix_web::web;

pub const ROUTE_SUMMARY: &str = "GET /api/health, POST /api/auth/{register,login}, \
    GET|POST /api/workouts, GET|PUT|DELETE /api/workouts/{id}, \
    GET|POST /api/exercises, GET|PUT|DELETE /api/exercises/{id}, \
    GET /api/analytics/{metrics,insights,heatmap,records}, \
    GET /api/admin/users, GET /api/admin/users/{id}, PUT /api/admin/users/{id}/role, DELETE /api/admin/users/{id}";

/// Registers every `/api` route. Everything outside `/health` and `/auth`
/// sits behind the bearer-token check.
pub fn configure(jwt_secret: String) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let auth = JwtAuthMiddleware::new(jwt_secret);

        cfg.app_data(json_config()).app_data(query_config()).service(
            web::scope("/api")
                .route("/health", web::get().to(health_check))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register))
                        .route("/login", web::post().to(login)),
                )
                .service(
                    web::scope("/workouts")
                        .wrap(auth.clone())
                        .route("", web::get().to(list_workouts))
                        .route("", web::post().to(create_workout))
                        .route("/{id}", web::get().to(get_workout))
                        .route("/{id}", web::put().to(update_workout))
                        .route("/{id}", web::delete().to(delete_workout)),
                )
                .service(
                    web::scope("/exercises")
                        .wrap(auth.clone())
                        .route("", web::get().to(list_exercises))
                        .route("", web::post().to(create_exercise))
                        .route("/{id}", web::get().to(get_exercise))
                        .route("/{id}", web::put().to(update_exercise))
                        .route("/{id}", web::delete().to(delete_exercise)),
                )
                .service(
                    web::scope("/analytics")
                        .wrap(auth.clone())
                        .route("/metrics", web::get().to(workout_metrics))
                        .route("/insights", web::get().to(training_insights))
                        .route("/heatmap", web::get().to(workout_heatmap))
                        .route("/records", web::get().to(personal_records)),
                )
                .service(
                    web::scope("/admin")
                        .wrap(auth)
                        .route("/users", web::get().to(list_users))
                        .route("/users/{id}", web::get().to(get_user))
                        .route("/users/{id}/role", web::put().to(set_user_role))
                        .route("/users/{id}", web::delete().to(delete_user)),
                ),
        );
    }
}

// Malformed bodies and query strings get the same JSON error shape as
// every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}
