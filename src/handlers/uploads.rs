// src/handlers/uploads.rs
// DOCUMENTATION: Image uploads for event and landmark forms
// PURPOSE: POST /uploads/{events|landmarks} with the raw image as body

use crate::errors::SiteError;
use crate::handlers::auth::{bearer_token, AuthContext};
use crate::services::storage_client::{self, MAX_IMAGE_BYTES};
use crate::services::{StorageClient, UploadFolder};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Original file name; only its extension is used
    pub filename: Option<String>,
}

/// POST /uploads/{folder}
pub async fn upload_image(
    req: HttpRequest,
    auth: web::Data<AuthContext>,
    storage: web::Data<StorageClient>,
    path: web::Path<String>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> Result<impl Responder, SiteError> {
    let user = auth.require_user(&req).await?;

    let folder = UploadFolder::parse(&path).ok_or_else(|| {
        log::warn!("Upload to unknown folder: {}", path.as_str());
        SiteError::NotFound(format!("Upload folder {}", path.as_str()))
    })?;

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok());
    storage_client::validate_image(content_type, body.len())?;
    let content_type = content_type.unwrap_or("application/octet-stream");

    let extension = storage_client::file_extension(query.filename.as_deref(), content_type);
    let token = bearer_token(&req).ok_or(SiteError::Unauthorized)?;

    log::info!(
        "User {} uploading {} bytes to {}",
        user.id(),
        body.len(),
        folder.prefix()
    );
    let url = storage
        .upload(folder, &extension, content_type, body.to_vec(), token)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "url": url })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/uploads")
            .app_data(web::PayloadConfig::new(MAX_IMAGE_BYTES))
            .route("/{folder}", web::post().to(upload_image)),
    );
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestContext;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_upload_requires_sign_in() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/uploads/events?filename=poster.png")
            .insert_header(("Content-Type", "image/png"))
            .set_payload(vec![1u8, 2, 3])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_upload_rejects_non_images_and_unknown_folders() {
        let ctx = TestContext::new();
        ctx.add_user("user-token", false).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/uploads/events?filename=notes.txt")
            .insert_header(("Authorization", "Bearer user-token"))
            .insert_header(("Content-Type", "text/plain"))
            .set_payload("hello")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Please select an image file (JPEG, PNG, GIF, WebP)");

        let req = test::TestRequest::post()
            .uri("/uploads/avatars")
            .insert_header(("Authorization", "Bearer user-token"))
            .insert_header(("Content-Type", "image/png"))
            .set_payload(vec![1u8, 2, 3])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_upload_without_storage_is_bad_gateway() {
        let ctx = TestContext::new();
        ctx.add_user("user-token", false).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.register(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/uploads/landmarks?filename=abbey.jpg")
            .insert_header(("Authorization", "Bearer user-token"))
            .insert_header(("Content-Type", "image/jpeg"))
            .set_payload(vec![0xFFu8, 0xD8, 0xFF])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to upload image");
    }
}
