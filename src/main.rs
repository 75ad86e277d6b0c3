// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, stores and clients, then start the HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod state;

#[cfg(test)]
mod test_support;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use db::StoreFactory;
use dotenv::dotenv;
use state::AppServices;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting visit-shaftesbury service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Content and profile stores
    let stores = match StoreFactory::from_config(&config).await {
        Ok(stores) => stores,
        Err(e) => {
            log::error!("Failed to initialize stores: {:#}", e);
            std::process::exit(1);
        }
    };

    // 5. Clients and shared state
    let services = AppServices::new(config.clone(), stores);
    log::info!(
        "Submission rate limit: {} per minute per client",
        config.submit_rate_per_minute
    );
    match config.trusted_proxy {
        Some(proxy) => log::info!("Trusting forwarded client addresses from {}", proxy),
        None => log::info!("No trusted proxy; clients are keyed by socket address"),
    }

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state and routes
            .configure(|cfg| services.register(cfg))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Unknown routes
            .default_service(web::to(handlers::not_found))
    })
    .bind(&server_addr)?
    .run()
    .await
}
