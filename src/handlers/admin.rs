// src/handlers/admin.rs
// DOCUMENTATION: Admin moderation handlers
// PURPOSE: Review queue, event and landmark curation
//
// Every route requires a bearer token whose profile is an admin.

use crate::db::SharedContentStore;
use crate::errors::SiteError;
use crate::handlers::auth::AuthContext;
use crate::models::{EventForm, EventStatusQuery, LandmarkForm, ListResponse, ModerationStatus};
use crate::services::{DashboardStats, EventService, LandmarkService, ModerationAction};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// GET /admin/dashboard
/// Counters plus the pending queue, all events and all landmarks
pub async fn dashboard(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
) -> Result<impl Responder, SiteError> {
    let admin = auth.require_admin(&req).await?;
    let store = store.get_ref().as_ref();

    let events = EventService::list_by_status(store, None).await?;
    let landmarks = LandmarkService::list_all(store).await?;
    let stats = DashboardStats::compute(&events, &landmarks);

    let pending: Vec<_> = events.iter().filter(|e| !e.is_published()).collect();

    log::debug!(
        "Dashboard for {}: {} pending, {} published",
        admin.id(),
        stats.pending_events,
        stats.published_events
    );

    Ok(HttpResponse::Ok().json(json!({
        "stats": stats,
        "pending_events": pending,
        "events": events,
        "landmarks": landmarks,
    })))
}

/// GET /admin/events?status=pending|published
pub async fn list_events(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    query: web::Query<EventStatusQuery>,
) -> Result<impl Responder, SiteError> {
    auth.require_admin(&req).await?;
    let events = EventService::list_by_status(store.get_ref().as_ref(), query.status).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(events)))
}

/// PUT /admin/events/{id}
/// Admin edit: status kept, recurrence editable
pub async fn update_event(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
    body: web::Json<EventForm>,
) -> Result<impl Responder, SiteError> {
    let admin = auth.require_admin(&req).await?;
    if let Err(e) = body.validate() {
        return Err(SiteError::ValidationError(e.to_string()));
    }

    let event = EventService::edit(
        store.get_ref().as_ref(),
        &admin,
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(event))
}

async fn moderate_event(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    id: Uuid,
    action: ModerationAction,
) -> Result<HttpResponse, SiteError> {
    auth.require_admin(&req).await?;
    let event = EventService::moderate(store.get_ref().as_ref(), id, action).await?;
    Ok(HttpResponse::Ok().json(event))
}

/// POST /admin/events/{id}/approve
pub async fn approve_event(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    moderate_event(req, auth, store, path.into_inner(), ModerationAction::Approve).await
}

/// POST /admin/events/{id}/unpublish
pub async fn unpublish_event(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    moderate_event(req, auth, store, path.into_inner(), ModerationAction::Unpublish).await
}

/// DELETE /admin/events/{id}
pub async fn delete_event(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    let admin = auth.require_admin(&req).await?;
    EventService::delete(store.get_ref().as_ref(), &admin, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /admin/landmarks
pub async fn list_landmarks(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
) -> Result<impl Responder, SiteError> {
    auth.require_admin(&req).await?;
    let landmarks = LandmarkService::list_all(store.get_ref().as_ref()).await?;
    Ok(HttpResponse::Ok().json(ListResponse::new(landmarks)))
}

/// POST /admin/landmarks
pub async fn create_landmark(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    body: web::Json<LandmarkForm>,
) -> Result<impl Responder, SiteError> {
    auth.require_admin(&req).await?;
    if let Err(e) = body.validate() {
        return Err(SiteError::ValidationError(e.to_string()));
    }

    let landmark = LandmarkService::create(store.get_ref().as_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(landmark))
}

/// PUT /admin/landmarks/{id}
pub async fn update_landmark(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
    body: web::Json<LandmarkForm>,
) -> Result<impl Responder, SiteError> {
    auth.require_admin(&req).await?;
    if let Err(e) = body.validate() {
        return Err(SiteError::ValidationError(e.to_string()));
    }

    let landmark = LandmarkService::update(
        store.get_ref().as_ref(),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(landmark))
}

async fn moderate_landmark(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    id: Uuid,
    action: ModerationAction,
) -> Result<HttpResponse, SiteError> {
    auth.require_admin(&req).await?;
    LandmarkService::moderate(store.get_ref().as_ref(), id, action).await?;
    let status: ModerationStatus = action.target_status();
    Ok(HttpResponse::Ok().json(json!({ "id": id, "status": status })))
}

/// POST /admin/landmarks/{id}/publish
pub async fn publish_landmark(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    moderate_landmark(req, auth, store, path.into_inner(), ModerationAction::Approve).await
}

/// POST /admin/landmarks/{id}/unpublish
pub async fn unpublish_landmark(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    moderate_landmark(req, auth, store, path.into_inner(), ModerationAction::Unpublish).await
}

/// DELETE /admin/landmarks/{id}
pub async fn delete_landmark(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    auth.require_admin(&req).await?;
    LandmarkService::delete(store.get_ref().as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/dashboard", web::get().to(dashboard))
            .route("/events", web::get().to(list_events))
            .route("/events/{id}", web::put().to(update_event))
            .route("/events/{id}", web::delete().to(delete_event))
            .route("/events/{id}/approve", web::post().to(approve_event))
            .route("/events/{id}/unpublish", web::post().to(unpublish_event))
            .route("/landmarks", web::get().to(list_landmarks))
            .route("/landmarks", web::post().to(create_landmark))
            .route("/landmarks/{id}", web::put().to(update_landmark))
            .route("/landmarks/{id}", web::delete().to(delete_landmark))
            .route("/landmarks/{id}/publish", web::post().to(publish_landmark))
            .route("/landmarks/{id}/unpublish", web::post().to(unpublish_landmark)),
    );
}
