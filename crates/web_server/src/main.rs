//! Main entry point for the YelpCamp server.
//! This crate wires configuration, the database and the route handlers together.

use std::sync::Arc;

use actix_files::Files;
use actix_web::{
    App, HttpServer,
    middleware::{Logger, NormalizePath},
    web,
};
use campground_services::{CampgroundStore, PgCampgroundStore};
use postgres::database::*;
use web_handlers::{MethodOverride, configure, not_found};

mod config;
use config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting YelpCamp server...");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Create database connection pool
    let pool = match create_connection_pool(&config.database_url, config.max_connections).await {
        Ok(pool) => {
            log::info!("🗃️ Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("❌ Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("❌ Failed to create database pool: {}", e);
            log::error!("💡 Make sure PostgreSQL is running and DATABASE_URL is correct");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        log::error!("❌ Failed to apply database migrations: {}", e);
        std::process::exit(1);
    }

    let store: Arc<dyn CampgroundStore> = Arc::new(PgCampgroundStore::new(pool));
    let store = web::Data::from(store);

    let static_dir = config.static_dir.clone();
    log::info!("📁 Static files location: {}", static_dir.display());
    log::info!("🌐 Server will be available at: http://{}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(MethodOverride)
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .service(
                Files::new("/static", static_dir.clone()).default_handler(web::to(not_found)),
            )
            .configure(configure)
            .default_service(web::to(not_found))
    })
    .bind(config.bind_address)?
    .run()
    .await
}
