// src/handlers/auth.rs
// DOCUMENTATION: Caller resolution for signed-in and admin routes
// PURPOSE: Bearer token -> hosted identity -> profile

use crate::db::SharedProfileStore;
use crate::errors::SiteError;
use crate::models::CurrentUser;
use crate::services::SharedIdentityProvider;
use actix_web::HttpRequest;
use std::net::{IpAddr, SocketAddr};

/// Identity lookups shared by account, admin and upload handlers
#[derive(Clone)]
pub struct AuthContext {
    pub identity: SharedIdentityProvider,
    pub profiles: SharedProfileStore,
}

impl AuthContext {
    pub fn new(identity: SharedIdentityProvider, profiles: SharedProfileStore) -> Self {
        Self { identity, profiles }
    }

    /// Signed-in caller, or 401
    /// DOCUMENTATION: A user without a profile row gets a non-admin
    /// profile built from the auth identity
    pub async fn require_user(&self, req: &HttpRequest) -> Result<CurrentUser, SiteError> {
        let token = bearer_token(req).ok_or_else(|| {
            log::warn!("Request to {} without bearer token", req.path());
            SiteError::Unauthorized
        })?;

        let auth = self.identity.user_for_token(token).await?;
        let profile = match self.profiles.get_profile(auth.id).await? {
            Some(profile) => profile,
            None => {
                log::debug!("No profile row for {}; using defaults", auth.id);
                auth.default_profile()
            }
        };

        Ok(CurrentUser { auth, profile })
    }

    /// Signed-in admin, or 401/403
    pub async fn require_admin(&self, req: &HttpRequest) -> Result<CurrentUser, SiteError> {
        let user = self.require_user(req).await?;
        if !user.is_admin() {
            log::warn!("Non-admin {} requested {}", user.id(), req.path());
            return Err(SiteError::Forbidden(
                "You must be an administrator to access this page.".to_string(),
            ));
        }
        Ok(user)
    }
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Client address for rate limiting and bot verification
/// DOCUMENTATION: The socket peer, unless the peer is `trusted_proxy`, in
/// which case Forwarded/X-Forwarded-For names the client
pub fn client_ip(req: &HttpRequest, trusted_proxy: Option<IpAddr>) -> Option<String> {
    let peer = req.peer_addr()?.ip();
    if trusted_proxy != Some(peer) {
        return Some(peer.to_string());
    }

    let info = req.connection_info();
    let addr = info.realip_remote_addr()?;
    Some(match addr.parse::<SocketAddr>() {
        Ok(socket) => socket.ip().to_string(),
        Err(_) => addr.to_string(),
    })
}
