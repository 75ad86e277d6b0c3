// src/handlers/events.rs
// DOCUMENTATION: Public event reads
// PURPOSE: Parse requests, call services, return responses

use crate::db::SharedContentStore;
use crate::errors::SiteError;
use crate::models::{EventListQuery, ListResponse};
use crate::services::EventService;
use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use uuid::Uuid;

/// GET /events
/// Published events, upcoming only unless include_past=true
pub async fn list_events(
    store: web::Data<SharedContentStore>,
    query: web::Query<EventListQuery>,
) -> Result<impl Responder, SiteError> {
    let today = Local::now().date_naive();
    let events = EventService::list_public(store.get_ref().as_ref(), &query, today).await;
    Ok(HttpResponse::Ok().json(ListResponse::new(events)))
}

/// GET /events/categories
/// Filter options for the events page
pub async fn list_categories(
    store: web::Data<SharedContentStore>,
) -> Result<impl Responder, SiteError> {
    let today = Local::now().date_naive();
    let events =
        EventService::list_public(store.get_ref().as_ref(), &EventListQuery::default(), today)
            .await;
    Ok(HttpResponse::Ok().json(ListResponse::new(EventService::categories(&events))))
}

/// GET /events/{id}
pub async fn get_event(
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    let event = EventService::get_public(store.get_ref().as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(event))
}

/// Configuration for public event routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::get().to(list_events))
            .route("/categories", web::get().to(list_categories))
            .route("/{id}", web::get().to(get_event)),
    );
}
