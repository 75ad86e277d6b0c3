// src/handlers/submit.rs
// DOCUMENTATION: Public event submission endpoint
// PURPOSE: POST /api/submit-event

use crate::config::Config;
use crate::db::SharedContentStore;
use crate::errors::SiteError;
use crate::handlers::auth::client_ip;
use crate::models::SubmitEventRequest;
use crate::services::{SubmissionLimiter, SubmissionService, TurnstileClient};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

/// POST /api/submit-event
/// DOCUMENTATION: Rate limited per client address, then verified and
/// stored as a pending event
pub async fn submit_event(
    req: HttpRequest,
    config: web::Data<Config>,
    store: web::Data<SharedContentStore>,
    turnstile: web::Data<TurnstileClient>,
    limiter: web::Data<SubmissionLimiter>,
    body: web::Json<SubmitEventRequest>,
) -> Result<impl Responder, SiteError> {
    let ip = client_ip(&req, config.trusted_proxy);
    limiter.check(ip.as_deref().unwrap_or("unknown"))?;

    SubmissionService::submit(
        store.get_ref().as_ref(),
        turnstile.get_ref(),
        &body,
        ip.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").route("/submit-event", web::post().to(submit_event)));
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::db::ContentStore;
    use crate::models::{EventFilter, ModerationStatus};
    use crate::test_support::TestContext;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    fn body() -> Value {
        json!({
            "title": "Hill Climb",
            "date": "2030-09-07",
            "time": "09:00",
            "location": "Gold Hill",
            "description": "Run up the famous hill",
            "submitter_name": "Alex",
            "submitter_email": "alex@example.com",
            "turnstileToken": "token"
        })
    }

    async fn post(ctx: &TestContext, payload: Value) -> (StatusCode, Value) {
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;
        let req = test::TestRequest::post()
            .uri("/api/submit-event")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_valid_submission_is_pending() {
        let ctx = TestContext::new();
        let (status, body) = post(&ctx, body()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let events = ctx.store.list_events(&EventFilter::default()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, ModerationStatus::Pending);
        assert!(ctx
            .store
            .list_events(&EventFilter::published())
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::test]
    async fn test_missing_email_rejected() {
        let ctx = TestContext::new();
        let mut payload = body();
        payload.as_object_mut().unwrap().remove("submitter_email");
        let (status, body) = post(&ctx, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "All fields are required");
    }

    #[actix_web::test]
    async fn test_malformed_email_rejected() {
        let ctx = TestContext::new();
        let mut payload = body();
        payload["submitter_email"] = json!("not-an-email");
        let (status, body) = post(&ctx, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email address");
    }

    #[actix_web::test]
    async fn test_padded_email_rejected() {
        let ctx = TestContext::new();
        let mut payload = body();
        payload["submitter_email"] = json!(" alex@example.com ");
        let (status, body) = post(&ctx, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email address");
    }

    #[actix_web::test]
    async fn test_missing_token_rejected_before_fields() {
        let ctx = TestContext::new();
        let (status, body) = post(&ctx, json!({ "title": "Only a title" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Security verification required");
    }

    #[actix_web::test]
    async fn test_invalid_date_rejected() {
        let ctx = TestContext::new();
        let mut payload = body();
        payload["date"] = json!("next saturday");
        let (status, body) = post(&ctx, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid date");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;
        let req = test::TestRequest::post()
            .uri("/api/submit-event")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_rate_limited() {
        let ctx = TestContext::with_submit_rate(1);
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let mut statuses = Vec::new();
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/submit-event")
                .peer_addr("192.0.2.10:4000".parse().unwrap())
                .set_json(body())
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }
        assert_eq!(statuses, vec![StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]);
    }

    #[actix_web::test]
    async fn test_rotating_forwarded_header_does_not_reset_quota() {
        let ctx = TestContext::with_submit_rate(1);
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let mut statuses = Vec::new();
        for spoofed in ["198.51.100.1", "198.51.100.2", "198.51.100.3"] {
            let req = test::TestRequest::post()
                .uri("/api/submit-event")
                .peer_addr("192.0.2.10:4000".parse().unwrap())
                .insert_header(("X-Forwarded-For", spoofed))
                .set_json(body())
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }
        assert_eq!(
            statuses,
            vec![
                StatusCode::OK,
                StatusCode::TOO_MANY_REQUESTS,
                StatusCode::TOO_MANY_REQUESTS
            ]
        );
    }

    #[actix_web::test]
    async fn test_trusted_proxy_forwards_client_address() {
        let mut config = Config::development();
        config.submit_rate_per_minute = 1;
        config.trusted_proxy = "192.0.2.1".parse().ok();
        let ctx = TestContext::with_config(config);
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let mut statuses = Vec::new();
        for client in ["198.51.100.1", "198.51.100.2", "198.51.100.1"] {
            let req = test::TestRequest::post()
                .uri("/api/submit-event")
                .peer_addr("192.0.2.1:4000".parse().unwrap())
                .insert_header(("X-Forwarded-For", client))
                .set_json(body())
                .to_request();
            statuses.push(test::call_service(&app, req).await.status());
        }
        assert_eq!(
            statuses,
            vec![
                StatusCode::OK,
                StatusCode::OK,
                StatusCode::TOO_MANY_REQUESTS
            ]
        );
    }
}
