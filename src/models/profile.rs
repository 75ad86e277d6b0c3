// src/models/profile.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row of the profiles table, keyed by the hosted auth user id
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub full_name: Option<String>,
}

/// Identity returned by the hosted auth service for a bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
}

impl AuthUser {
    /// Profile used when the user has no profiles row yet
    pub fn default_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            is_admin: false,
            full_name: self.full_name.clone(),
        }
    }
}

/// Signed-in caller resolved from token and profile
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub auth: AuthUser,
    pub profile: UserProfile,
}

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.auth.id
    }

    pub fn is_admin(&self) -> bool {
        self.profile.is_admin
    }

    /// Name for greetings: profile name, then auth metadata name, then email
    pub fn display_name(&self) -> &str {
        self.profile
            .full_name
            .as_deref()
            .or(self.auth.full_name.as_deref())
            .unwrap_or(&self.auth.email)
    }
}
