// src/handlers/landmarks.rs
// DOCUMENTATION: Public landmark reads and the map feed

use crate::db::SharedContentStore;
use crate::errors::SiteError;
use crate::models::ListResponse;
use crate::services::LandmarkService;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

/// GET /landmarks
pub async fn list_landmarks(
    store: web::Data<SharedContentStore>,
) -> Result<impl Responder, SiteError> {
    let landmarks = LandmarkService::list_public(store.get_ref().as_ref()).await;
    Ok(HttpResponse::Ok().json(ListResponse::new(landmarks)))
}

/// GET /landmarks/map
/// GeoJSON FeatureCollection of published landmarks with a position
pub async fn landmarks_map(
    store: web::Data<SharedContentStore>,
) -> Result<impl Responder, SiteError> {
    let collection = LandmarkService::map_features(store.get_ref().as_ref()).await;
    Ok(HttpResponse::Ok()
        .content_type("application/geo+json")
        .json(collection))
}

/// GET /landmarks/{id}
pub async fn get_landmark(
    store: web::Data<SharedContentStore>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, SiteError> {
    let landmark = LandmarkService::get_public(store.get_ref().as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(landmark))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/landmarks")
            .route("", web::get().to(list_landmarks))
            .route("/map", web::get().to(landmarks_map))
            .route("/{id}", web::get().to(get_landmark)),
    );
}

#[cfg(test)]
mod tests {
    use crate::models::{Landmark, ModerationStatus};
    use crate::test_support::TestContext;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use uuid::Uuid;

    fn landmark(name: &str, status: Option<ModerationStatus>, position: Option<(f64, f64)>) -> Landmark {
        Landmark {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: "Worth a visit".to_string(),
            category: Some("Historic".to_string()),
            distance: Some("0.1 miles".to_string()),
            key_info: None,
            lat: position.map(|p| p.0),
            lng: position.map(|p| p.1),
            image_url: None,
            website_url: None,
            status,
            sort_order: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[actix_web::test]
    async fn test_public_landmarks() {
        let ctx = TestContext::new();
        let abbey = landmark("Abbey", Some(ModerationStatus::Published), Some((51.0056, -2.1978)));
        let hidden = landmark("Draft", None, Some((51.0, -2.2)));
        ctx.store.insert_landmark(abbey.clone()).await;
        ctx.store.insert_landmark(hidden.clone()).await;
        ctx.store
            .insert_landmark(landmark("Viewpoint", Some(ModerationStatus::Published), None))
            .await;
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::get().uri("/landmarks").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["data"][0]["type"], "Historic");

        let req = test::TestRequest::get().uri("/landmarks/map").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().unwrap().len(), 1);
        assert_eq!(body["features"][0]["geometry"]["coordinates"][0], -2.1978);

        let req = test::TestRequest::get()
            .uri(&format!("/landmarks/{}", abbey.id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/landmarks/{}", hidden.id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
