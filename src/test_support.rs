// src/test_support.rs
// DOCUMENTATION: Shared fixtures for handler tests
// PURPOSE: Full app wiring over the in-memory store and a fixed token table

use crate::config::Config;
use crate::db::{MemoryStore, Stores};
use crate::errors::SiteError;
use crate::models::{AuthUser, UserProfile};
use crate::services::{IdentityProvider, SharedIdentityProvider};
use crate::state::AppServices;
use actix_web::{dev::ServerHandle, web, App, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Token table standing in for the hosted auth service
#[derive(Default)]
pub struct StaticIdentity {
    users: Mutex<HashMap<String, AuthUser>>,
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn user_for_token(&self, token: &str) -> Result<AuthUser, SiteError> {
        self.users
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(SiteError::Unauthorized)
    }
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    identity: Arc<StaticIdentity>,
    services: AppServices,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_submit_rate(1000)
    }

    pub fn with_submit_rate(per_minute: u32) -> Self {
        let mut config = Config::development();
        config.submit_rate_per_minute = per_minute;
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let identity = Arc::new(StaticIdentity::default());
        let shared_identity: SharedIdentityProvider = identity.clone();
        let stores = Stores {
            content: store.clone(),
            profiles: store.clone(),
        };

        Self {
            store,
            identity,
            services: AppServices::with_identity(config, stores, shared_identity),
        }
    }

    /// Known token without a profile row
    pub fn add_identity(&self, token: &str, email: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: None,
        };
        self.identity
            .users
            .lock()
            .unwrap()
            .insert(token.to_string(), user.clone());
        user
    }

    /// Known token with a profile row
    pub async fn add_user(&self, token: &str, is_admin: bool) -> Uuid {
        let auth = self.add_identity(token, &format!("{}@example.com", token));
        self.store
            .insert_profile(UserProfile {
                id: auth.id,
                email: auth.email.clone(),
                is_admin,
                full_name: Some(format!("User {}", token)),
            })
            .await;
        auth.id
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        self.services.register(cfg);
    }
}

/// Search results per response from the canned CMS
const FAKE_CMS_BATCH: usize = 2;

#[derive(Default)]
pub struct FakeCmsState {
    pages: Vec<Value>,
    /// (method and path, JSON body) of every write and search
    requests: Vec<(String, Value)>,
}

type SharedCms = web::Data<Mutex<FakeCmsState>>;

/// Canned CMS REST API on an ephemeral local port
pub struct FakeCms {
    pub base_url: String,
    state: SharedCms,
    handle: ServerHandle,
}

impl FakeCms {
    /// Serve `pages` through search, retrieve, create and update
    pub fn start(pages: Vec<Value>) -> Self {
        let state: SharedCms = web::Data::new(Mutex::new(FakeCmsState {
            pages,
            requests: Vec::new(),
        }));
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/search", web::post().to(fake_search))
                .route("/pages", web::post().to(fake_create))
                .route("/pages/{id}", web::get().to(fake_retrieve))
                .route("/pages/{id}", web::patch().to(fake_update))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Page object as the CMS returns it
pub fn cms_page(id: &str, database_id: &str, properties: Value) -> Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": "2025-03-01T09:30:00.000Z",
        "last_edited_time": "2025-03-04T12:00:00.000Z",
        "archived": false,
        "parent": { "type": "database_id", "database_id": database_id },
        "properties": properties
    })
}

fn position(pages: &[Value], id: &str) -> Option<usize> {
    pages.iter().position(|p| p["id"].as_str() == Some(id))
}

fn cms_error(status: u16, code: &str) -> HttpResponse {
    let body = json!({ "object": "error", "status": status, "code": code });
    match status {
        400 => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::NotFound().json(body),
    }
}

async fn fake_search(state: SharedCms, body: web::Json<Value>) -> HttpResponse {
    let body = body.into_inner();
    let mut state = state.lock().unwrap();
    state.requests.push(("POST /search".to_string(), body.clone()));

    let total = state.pages.len();
    let start = body["start_cursor"]
        .as_str()
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0)
        .min(total);
    let end = (start + FAKE_CMS_BATCH).min(total);
    let has_more = end < total;

    HttpResponse::Ok().json(json!({
        "object": "list",
        "results": state.pages[start..end].to_vec(),
        "has_more": has_more,
        "next_cursor": if has_more { Some(end.to_string()) } else { None }
    }))
}

async fn fake_retrieve(state: SharedCms, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    // Malformed and nil ids fail validation
    if Uuid::parse_str(&id).map(|u| u.is_nil()).unwrap_or(true) {
        return cms_error(400, "validation_error");
    }
    let state = state.lock().unwrap();
    match position(&state.pages, &id) {
        Some(i) => HttpResponse::Ok().json(state.pages[i].clone()),
        None => cms_error(404, "object_not_found"),
    }
}

async fn fake_create(state: SharedCms, body: web::Json<Value>) -> HttpResponse {
    let body = body.into_inner();
    let mut state = state.lock().unwrap();
    state.requests.push(("POST /pages".to_string(), body.clone()));

    let mut page = cms_page(&Uuid::new_v4().to_string(), "", body["properties"].clone());
    page["parent"] = body["parent"].clone();
    state.pages.push(page.clone());
    HttpResponse::Ok().json(page)
}

async fn fake_update(
    state: SharedCms,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let id = path.into_inner();
    let body = body.into_inner();
    let mut state = state.lock().unwrap();
    state
        .requests
        .push((format!("PATCH /pages/{}", id), body.clone()));

    let Some(i) = position(&state.pages, &id) else {
        return cms_error(404, "object_not_found");
    };
    if let Some(archived) = body.get("archived") {
        state.pages[i]["archived"] = archived.clone();
    }
    HttpResponse::Ok().json(state.pages[i].clone())
}
