use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(config);

    let parser_service = web::Data::new(state.parser_service);
    let mapper_config = web::Data::new(state.mapper_config);

    tracing::info!("Starting GRC engine server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(parser_service.clone())
            .app_data(mapper_config.clone())
            .configure(api::framework::configure)
            .configure(api::mapping::configure)
            .configure(api::catalog::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
