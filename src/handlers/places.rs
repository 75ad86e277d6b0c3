// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for dining and accommodation listings
// PURPOSE: Parse requests, call services, return responses

use crate::db::SharedContentStore;
use crate::errors::SiteError;
use crate::models::{ListResponse, PlaceKind};
use crate::services::PlaceService;
use actix_web::{web, HttpResponse, Responder};

async fn list_kind(
    store: &SharedContentStore,
    kind: PlaceKind,
) -> Result<HttpResponse, SiteError> {
    let places = PlaceService::list(store.as_ref(), kind).await;
    Ok(HttpResponse::Ok().json(ListResponse::new(places)))
}

/// GET /dining
pub async fn list_dining(
    store: web::Data<SharedContentStore>,
) -> Result<impl Responder, SiteError> {
    list_kind(store.get_ref(), PlaceKind::Dining).await
}

/// GET /accommodation
pub async fn list_accommodation(
    store: web::Data<SharedContentStore>,
) -> Result<impl Responder, SiteError> {
    list_kind(store.get_ref(), PlaceKind::Accommodation).await
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dining", web::get().to(list_dining))
        .route("/accommodation", web::get().to(list_accommodation));
}
