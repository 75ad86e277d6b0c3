// src/handlers/seo.rs
// DOCUMENTATION: Crawler metadata endpoints
// PURPOSE: GET /sitemap.xml and GET /robots.txt

use crate::config::Config;
use crate::db::SharedContentStore;
use crate::services::SitemapService;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;

/// GET /sitemap.xml
pub async fn sitemap(
    config: web::Data<Config>,
    store: web::Data<SharedContentStore>,
) -> impl Responder {
    let entries =
        SitemapService::entries(store.get_ref().as_ref(), &config.site_url, Utc::now()).await;
    log::debug!("Sitemap with {} entries", entries.len());

    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(SitemapService::render_xml(&entries))
}

/// GET /robots.txt
pub async fn robots(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(SitemapService::robots_txt(&config.site_url))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/sitemap.xml", web::get().to(sitemap))
        .route("/robots.txt", web::get().to(robots));
}
