//! # Forum API Server
//!
//! The main entry point for the actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use forum_core::ports::{PasswordService, TokenService};
use forum_infra::auth::{Argon2PasswordService, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting forum API server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(config.database.as_ref()).await;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,forum_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
