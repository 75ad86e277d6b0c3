// src/handlers/account.rs
// DOCUMENTATION: Signed-in user's own profile and events
// PURPOSE: Requires a bearer token; edits follow the moderation rules

use crate::db::SharedContentStore;
use crate::errors::SiteError;
use crate::handlers::auth::AuthContext;
use crate::models::{EventForm, ListResponse};
use crate::services::EventService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// GET /account
/// Profile plus the caller's events, newest first
pub async fn get_account(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
) -> Result<impl Responder, SiteError> {
    let user = auth.require_user(&req).await?;
    let events = EventService::list_for_owner(store.get_ref().as_ref(), &user).await?;

    Ok(HttpResponse::Ok().json(json!({
        "profile": &user.profile,
        "display_name": user.display_name(),
        "events": ListResponse::new(events),
    })))
}

/// POST /account/events
pub async fn create_event(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    body: web::Json<EventForm>,
) -> Result<impl Responder, SiteError> {
    let user = auth.require_user(&req).await?;
    if let Err(e) = body.validate() {
        return Err(SiteError::ValidationError(e.to_string()));
    }

    let event =
        EventService::create_for_user(store.get_ref().as_ref(), &user, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(event))
}

/// PUT /account/events/{id}
/// Owner edit; a published event goes back to pending
pub async fn update_event(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
    body: web::Json<EventForm>,
) -> Result<impl Responder, SiteError> {
    let user = auth.require_user(&req).await?;
    if let Err(e) = body.validate() {
        return Err(SiteError::ValidationError(e.to_string()));
    }

    let event = EventService::edit(
        store.get_ref().as_ref(),
        &user,
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(event))
}

/// DELETE /account/events/{id}
pub async fn delete_event(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    let user = auth.require_user(&req).await?;
    EventService::delete(store.get_ref().as_ref(), &user, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/account")
            .route("", web::get().to(get_account))
            .route("/events", web::post().to(create_event))
            .route("/events/{id}", web::put().to(update_event))
            .route("/events/{id}", web::delete().to(delete_event)),
    );
}

#[cfg(test)]
mod tests {
    use crate::db::ContentStore;
    use crate::models::ModerationStatus;
    use crate::test_support::TestContext;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use uuid::Uuid;

    fn form(title: &str) -> Value {
        json!({
            "title": title,
            "date": "2030-05-01",
            "time": "19:30",
            "location": "Arts Centre",
            "description": "An evening concert",
            "image_url": "",
            "category": "Music"
        })
    }

    #[actix_web::test]
    async fn test_requires_sign_in() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::get().uri("/account").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/account")
            .insert_header(("Authorization", "Bearer unknown"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_account_falls_back_to_default_profile() {
        let ctx = TestContext::new();
        ctx.add_identity("no-profile", "new@example.com");
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::get()
            .uri("/account")
            .insert_header(("Authorization", "Bearer no-profile"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["profile"]["email"], "new@example.com");
        assert_eq!(body["profile"]["is_admin"], false);
        assert_eq!(body["events"]["total"], 0);
    }

    #[actix_web::test]
    async fn test_user_without_profile_can_create_events() {
        let ctx = TestContext::new();
        let auth = ctx.add_identity("no-profile", "new@example.com");
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/account/events")
            .insert_header(("Authorization", "Bearer no-profile"))
            .set_json(form("First event"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id: Uuid = serde_json::from_value(created["id"].clone()).unwrap();

        let stored = ctx.store.get_event(id).await.unwrap().unwrap();
        assert_eq!(stored.owner_id, Some(auth.id));
    }

    #[actix_web::test]
    async fn test_owner_edit_returns_published_event_to_review() {
        let ctx = TestContext::new();
        ctx.add_user("owner-token", false).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/account/events")
            .insert_header(("Authorization", "Bearer owner-token"))
            .set_json(form("Concert"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["status"], "pending");
        let id: Uuid = serde_json::from_value(created["id"].clone()).unwrap();

        ctx.store
            .set_event_status(id, ModerationStatus::Published)
            .await
            .unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/account/events/{}", id))
            .insert_header(("Authorization", "Bearer owner-token"))
            .set_json(form("Concert (moved)"))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], "pending");
        assert_eq!(updated["title"], "Concert (moved)");

        let req = test::TestRequest::get()
            .uri("/account")
            .insert_header(("Authorization", "Bearer owner-token"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["events"]["total"], 1);
    }

    #[actix_web::test]
    async fn test_other_users_events_are_forbidden() {
        let ctx = TestContext::new();
        ctx.add_user("owner-token", false).await;
        ctx.add_user("other-token", false).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/account/events")
            .insert_header(("Authorization", "Bearer owner-token"))
            .set_json(form("Concert"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/account/events/{}", id))
            .insert_header(("Authorization", "Bearer other-token"))
            .set_json(form("Hijacked"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&format!("/account/events/{}", id))
            .insert_header(("Authorization", "Bearer other-token"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&format!("/account/events/{}", id))
            .insert_header(("Authorization", "Bearer owner-token"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_edit_missing_event_is_not_found() {
        let ctx = TestContext::new();
        ctx.add_user("owner-token", false).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::put()
            .uri(&format!("/account/events/{}", Uuid::new_v4()))
            .insert_header(("Authorization", "Bearer owner-token"))
            .set_json(form("Ghost"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_invalid_form_rejected() {
        let ctx = TestContext::new();
        ctx.add_user("owner-token", false).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/account/events")
            .insert_header(("Authorization", "Bearer owner-token"))
            .set_json(form(""))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
