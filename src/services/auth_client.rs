// src/services/auth_client.rs
// DOCUMENTATION: Hosted authentication client
// PURPOSE: Resolve a caller's bearer token into an identity

use crate::errors::SiteError;
use crate::models::AuthUser;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Token to identity lookup
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Err(Unauthorized) when the token is unknown or expired
    async fn user_for_token(&self, token: &str) -> Result<AuthUser, SiteError>;
}

pub type SharedIdentityProvider = Arc<dyn IdentityProvider>;

#[derive(Debug, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

impl From<AuthUserResponse> for AuthUser {
    fn from(r: AuthUserResponse) -> Self {
        AuthUser {
            id: r.id,
            email: r.email.unwrap_or_default(),
            full_name: r
                .user_metadata
                .and_then(|m| m.full_name)
                .filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Client for `GET {base_url}/auth/v1/user`
pub struct HostedAuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl HostedAuthClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }
}

#[async_trait]
impl IdentityProvider for HostedAuthClient {
    async fn user_for_token(&self, token: &str) -> Result<AuthUser, SiteError> {
        if self.base_url.is_empty() {
            log::warn!("Rejecting signed-in request: AUTH_URL not configured");
            return Err(SiteError::Unauthorized);
        }

        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                log::error!("Auth request failed: {}", e);
                SiteError::ExternalApiError(format!("Auth request failed: {}", e))
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                log::debug!("Auth service rejected token");
                Err(SiteError::Unauthorized)
            }
            s if s.is_success() => {
                let user: AuthUserResponse = response.json().await.map_err(|e| {
                    log::error!("Failed to parse auth user: {}", e);
                    SiteError::ExternalApiError(format!("Parse error: {}", e))
                })?;
                Ok(user.into())
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                log::error!("Auth service error {}: {}", s, body);
                Err(SiteError::ExternalApiError(format!("Auth error {}", s)))
            }
        }
    }
}
