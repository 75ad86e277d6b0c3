// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Route registration, extractor settings, fallback 404

pub mod account;
pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod landmarks;
pub mod places;
pub mod seo;
pub mod submit;
pub mod uploads;

pub use account::config as account_config;
pub use admin::config as admin_config;
pub use auth::AuthContext;
pub use events::config as events_config;
pub use health::config as health_config;
pub use landmarks::config as landmarks_config;
pub use places::config as places_config;
pub use seo::config as seo_config;
pub use submit::config as submit_config;
pub use uploads::config as uploads_config;

use crate::errors::SiteError;
use actix_web::{web, HttpRequest};

/// JSON body limit for form endpoints
const JSON_LIMIT: usize = 64 * 1024;

/// Malformed bodies and query strings become JSON 400s, bad path ids 404s
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(JSON_LIMIT).error_handler(
        |err, req| {
            log::debug!("Rejected JSON body for {}: {}", req.path(), err);
            SiteError::InvalidInput(err.to_string()).into()
        },
    ))
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        log::debug!("Rejected query for {}: {}", req.path(), err);
        SiteError::InvalidInput(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_, req| {
        SiteError::NotFound(req.path().to_string()).into()
    }));
}

/// Every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(extractor_config)
        .configure(health_config)
        .configure(events_config)
        .configure(landmarks_config)
        .configure(places_config)
        .configure(submit_config)
        .configure(account_config)
        .configure(admin_config)
        .configure(uploads_config)
        .configure(seo_config);
}

/// Default service for unknown routes
pub async fn not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, SiteError> {
    log::debug!("No route for {} {}", req.method(), req.path());
    Err(SiteError::NotFound("Page".to_string()))
}
