// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Simple endpoint to verify service status

use crate::db::SharedContentStore;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn health_check(store: web::Data<SharedContentStore>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "visit-shaftesbury",
        "version": env!("CARGO_PKG_VERSION"),
        "content_backend": store.backend_name()
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
