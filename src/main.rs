mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod state;
mod utils;

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting {}...", env!("CARGO_PKG_NAME"));

    // External clients live for the whole process
    let clients = state::Clients::init(&config).await.map_err(|e| {
        log::error!("❌ Failed to initialize external clients: {}", e);
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    let app_state = web::Data::new(clients.app_state(config.expose_error_details));
    if !config.expose_error_details {
        log::info!("🔒 Error details hidden from responses");
    }

    let allowed_origin = config.allowed_origin.clone();
    let static_dir = config.static_dir.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("🔓 CORS allowed origin: {}", allowed_origin);
    log::info!("📁 Static files from: {}", static_dir);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::cors::build(&allowed_origin))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
            // Static front-end, mounted last so API routes take precedence
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("🛑 Server stopped, closing clients");
    clients.close().await;

    Ok(())
}
