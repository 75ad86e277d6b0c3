// src/state.rs
// DOCUMENTATION: Shared application state
// PURPOSE: Build clients once and register them with every worker's App

use crate::config::Config;
use crate::db::{SharedContentStore, Stores};
use crate::handlers::{self, AuthContext};
use crate::services::{
    HostedAuthClient, SharedIdentityProvider, StorageClient, SubmissionLimiter, TurnstileClient,
};
use actix_web::web;
use std::sync::Arc;

/// Everything handlers extract through `web::Data`
#[derive(Clone)]
pub struct AppServices {
    pub config: Config,
    pub content: SharedContentStore,
    pub auth: AuthContext,
    pub turnstile: Arc<TurnstileClient>,
    pub storage: Arc<StorageClient>,
    pub submit_limiter: Arc<SubmissionLimiter>,
}

impl AppServices {
    pub fn new(config: Config, stores: Stores) -> Self {
        let identity: SharedIdentityProvider = Arc::new(HostedAuthClient::new(
            config.auth_url.clone(),
            config.auth_anon_key.clone(),
        ));
        Self::with_identity(config, stores, identity)
    }

    pub fn with_identity(config: Config, stores: Stores, identity: SharedIdentityProvider) -> Self {
        let turnstile = TurnstileClient::new(
            config.turnstile_secret_key.clone(),
            config.turnstile_verify_url.clone(),
        );
        let storage = StorageClient::new(
            config.auth_url.clone(),
            config.auth_anon_key.clone(),
            config.storage_bucket.clone(),
        );
        let submit_limiter = SubmissionLimiter::per_minute(config.submit_rate_per_minute);

        Self {
            content: stores.content,
            auth: AuthContext::new(identity, stores.profiles),
            turnstile: Arc::new(turnstile),
            storage: Arc::new(storage),
            submit_limiter: Arc::new(submit_limiter),
            config,
        }
    }

    /// Application data plus all routes
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.content.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::from(self.turnstile.clone()))
            .app_data(web::Data::from(self.storage.clone()))
            .app_data(web::Data::from(self.submit_limiter.clone()))
            .configure(handlers::configure);
    }
}
