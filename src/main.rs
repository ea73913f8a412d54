use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use fittrack_api::infrastructure::config::Config;
use fittrack_api::infrastructure::logging::init_logging;
use fittrack_api::presentation::handlers::AppState;
use fittrack_api::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use fittrack_api::presentation::routes::{self, ROUTE_SUMMARY};
use tracing::{info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> anyhow::Result<()> {
    let env_file = dotenv::dotenv();
    let config = Config::load()?;
    init_logging(&config.log_level);
    match env_file {
        Ok(path) => info!(path = %path.display(), "Loaded .env file"),
        Err(e) => info!("No .env file loaded: {e}"),
    }
    info!(
        host = %config.host,
        port = config.port,
        token_ttl_secs = config.token_ttl_secs,
        log_level = %config.log_level,
        cors_origin = %config.cors_origin,
        admin_seeded = config.admin.is_some(),
        "Configuration loaded"
    );

    let state = web::Data::new(AppState::in_memory(
        config.jwt_secret.clone(),
        config.token_ttl_secs,
    ));
    info!("Application state initialized");

    let seeded = state.exercises.seed_defaults().await?;
    info!(seeded, "Exercise catalog ready");

    if let Some(seed) = &config.admin {
        let admin = state
            .auth_service
            .ensure_admin(seed)
            .await
            .context("failed to seed admin account")?;
        info!(user_id = %admin.id, "Admin account ready");
    }

    let jwt_secret = config.jwt_secret.clone();
    let cors_origin = config.cors_origin.clone();
    let server = HttpServer::new(move || {
        tracing::trace!("Creating new application instance");
        App::new()
            .app_data(state.clone())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(cors(&cors_origin))
            .configure(routes::configure(jwt_secret.clone()))
    });

    let (host, port) = config.bind_addr();
    let server = server
        .bind((host.as_str(), port))
        .with_context(|| format!("failed to bind {host}:{port}"))?;

    info!(address = %format!("{host}:{port}"), routes = %ROUTE_SUMMARY, "Starting HTTP server");
    server.run().await?;
    Ok(())
}

fn cors(origin: &str) -> Cors {
    let cors = if origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default().allowed_origin(origin)
    };
    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(vec![
            HeaderName::from_static("x-request-id"),
            HeaderName::from_static("x-response-time"),
        ])
        .max_age(3600)
}
