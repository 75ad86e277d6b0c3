// src/db/profile_repository.rs
// DOCUMENTATION: Profile database operations
// PURPOSE: Read the administrator flag and display name for a signed-in user

use crate::db::store::{ProfileStore, StoreResult};
use crate::errors::SiteError;
use crate::models::UserProfile;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT id, email, is_admin, full_name FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!("Failed to load profile {}: {}", id, e);
            SiteError::DatabaseError(e.to_string())
        })
    }
}
