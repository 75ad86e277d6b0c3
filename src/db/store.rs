// src/db/store.rs
// DOCUMENTATION: Storage traits shared by every content backend
// PURPOSE: Handlers and services depend on these, never on a concrete backend

use crate::errors::SiteError;
use crate::models::{
    Event, EventChanges, EventFilter, Landmark, LandmarkDraft, ModerationStatus, NewEvent, Place,
    PlaceKind, UserProfile,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, SiteError>;

/// Events, landmarks and places
/// DOCUMENTATION: Implemented by PgContentStore, NotionContentStore and MemoryStore.
/// Lookups return Ok(None) for absent records; mutations on absent
/// records return SiteError::NotFound.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    // ==================== Events ====================

    async fn list_events(&self, filter: &EventFilter) -> StoreResult<Vec<Event>>;

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>>;

    async fn create_event(&self, event: &NewEvent) -> StoreResult<Event>;

    async fn update_event(&self, id: Uuid, changes: &EventChanges) -> StoreResult<Event>;

    async fn set_event_status(&self, id: Uuid, status: ModerationStatus) -> StoreResult<()>;

    async fn delete_event(&self, id: Uuid) -> StoreResult<()>;

    // ==================== Landmarks ====================

    /// `None` lists every landmark regardless of status
    async fn list_landmarks(&self, status: Option<ModerationStatus>) -> StoreResult<Vec<Landmark>>;

    async fn get_landmark(&self, id: Uuid) -> StoreResult<Option<Landmark>>;

    async fn create_landmark(&self, draft: &LandmarkDraft) -> StoreResult<Landmark>;

    async fn update_landmark(&self, id: Uuid, draft: &LandmarkDraft) -> StoreResult<Landmark>;

    async fn set_landmark_status(&self, id: Uuid, status: ModerationStatus) -> StoreResult<()>;

    async fn delete_landmark(&self, id: Uuid) -> StoreResult<()>;

    // ==================== Places ====================

    /// Places of one kind ordered by sort_order
    async fn list_places(&self, kind: PlaceKind) -> StoreResult<Vec<Place>>;
}

/// User profiles (administrator flag, display name)
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<UserProfile>>;
}

pub type SharedContentStore = Arc<dyn ContentStore>;
pub type SharedProfileStore = Arc<dyn ProfileStore>;
