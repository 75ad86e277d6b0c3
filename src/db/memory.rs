// src/db/memory.rs
// DOCUMENTATION: In-process content and profile store
// PURPOSE: Local development without external services, and the backend for handler tests

use crate::db::store::{ContentStore, ProfileStore, StoreResult};
use crate::errors::SiteError;
use crate::models::*;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    events: HashMap<Uuid, Event>,
    landmarks: HashMap<Uuid, Landmark>,
    places: Vec<Place>,
    profiles: HashMap<Uuid, UserProfile>,
}

/// Thread-safe store holding every table in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_profile(&self, profile: UserProfile) {
        self.tables.write().await.profiles.insert(profile.id, profile);
    }

    pub async fn insert_place(&self, place: Place) {
        self.tables.write().await.places.push(place);
    }

    /// Insert a fully formed event (keeps its id and created_at)
    pub async fn insert_event(&self, event: Event) {
        self.tables.write().await.events.insert(event.id, event);
    }

    pub async fn insert_landmark(&self, landmark: Landmark) {
        self.tables.write().await.landmarks.insert(landmark.id, landmark);
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_events(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        let tables = self.tables.read().await;
        let mut events: Vec<Event> = tables
            .events
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        filter.sort(&mut events);
        Ok(events)
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn create_event(&self, new: &NewEvent) -> StoreResult<Event> {
        let event = Event {
            id: Uuid::new_v4(),
            title: new.title.clone(),
            date: Some(new.date),
            time: new.time.clone(),
            location: new.location.clone(),
            description: new.description.clone(),
            image_url: new.image_url.clone(),
            website_url: new.website_url.clone(),
            status: new.status,
            recurring: new.recurring,
            category: new.category.clone(),
            lat: new.lat,
            lng: new.lng,
            owner_id: new.owner_id,
            submitter_name: new.submitter_name.clone(),
            submitter_email: new.submitter_email.clone(),
            created_at: Some(Utc::now()),
        };
        self.tables.write().await.events.insert(event.id, event.clone());
        log::info!("Created event with id: {}", event.id);
        Ok(event)
    }

    async fn update_event(&self, id: Uuid, changes: &EventChanges) -> StoreResult<Event> {
        let mut tables = self.tables.write().await;
        let event = tables
            .events
            .get_mut(&id)
            .ok_or_else(|| SiteError::NotFound(format!("Event {}", id)))?;

        event.title = changes.title.clone();
        event.date = Some(changes.date);
        event.time = changes.time.clone();
        event.location = changes.location.clone();
        event.description = changes.description.clone();
        event.image_url = changes.image_url.clone();
        event.website_url = changes.website_url.clone();
        event.status = changes.status;
        event.recurring = changes.recurring;
        event.category = changes.category.clone();
        event.lat = changes.lat;
        event.lng = changes.lng;

        Ok(event.clone())
    }

    async fn set_event_status(&self, id: Uuid, status: ModerationStatus) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let event = tables
            .events
            .get_mut(&id)
            .ok_or_else(|| SiteError::NotFound(format!("Event {}", id)))?;
        event.status = status;
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .events
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| SiteError::NotFound(format!("Event {}", id)))
    }

    async fn list_landmarks(&self, status: Option<ModerationStatus>) -> StoreResult<Vec<Landmark>> {
        let tables = self.tables.read().await;
        let mut landmarks: Vec<Landmark> = tables
            .landmarks
            .values()
            .filter(|l| status.is_none() || l.status == status)
            .cloned()
            .collect();
        landmarks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(landmarks)
    }

    async fn get_landmark(&self, id: Uuid) -> StoreResult<Option<Landmark>> {
        Ok(self.tables.read().await.landmarks.get(&id).cloned())
    }

    async fn create_landmark(&self, draft: &LandmarkDraft) -> StoreResult<Landmark> {
        let landmark = Landmark {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            distance: draft.distance.clone(),
            key_info: draft.key_info.clone(),
            lat: draft.lat,
            lng: draft.lng,
            image_url: draft.image_url.clone(),
            website_url: draft.website_url.clone(),
            status: draft.status,
            sort_order: draft.sort_order,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        self.tables
            .write()
            .await
            .landmarks
            .insert(landmark.id, landmark.clone());
        Ok(landmark)
    }

    async fn update_landmark(&self, id: Uuid, draft: &LandmarkDraft) -> StoreResult<Landmark> {
        let mut tables = self.tables.write().await;
        let landmark = tables
            .landmarks
            .get_mut(&id)
            .ok_or_else(|| SiteError::NotFound(format!("Landmark {}", id)))?;

        landmark.name = draft.name.clone();
        landmark.description = draft.description.clone();
        landmark.category = draft.category.clone();
        landmark.distance = draft.distance.clone();
        landmark.key_info = draft.key_info.clone();
        landmark.lat = draft.lat;
        landmark.lng = draft.lng;
        landmark.image_url = draft.image_url.clone();
        landmark.website_url = draft.website_url.clone();
        landmark.status = draft.status;
        landmark.sort_order = draft.sort_order;
        landmark.updated_at = Some(Utc::now());

        Ok(landmark.clone())
    }

    async fn set_landmark_status(&self, id: Uuid, status: ModerationStatus) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let landmark = tables
            .landmarks
            .get_mut(&id)
            .ok_or_else(|| SiteError::NotFound(format!("Landmark {}", id)))?;
        landmark.status = Some(status);
        landmark.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn delete_landmark(&self, id: Uuid) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .landmarks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| SiteError::NotFound(format!("Landmark {}", id)))
    }

    async fn list_places(&self, kind: PlaceKind) -> StoreResult<Vec<Place>> {
        let tables = self.tables.read().await;
        let mut places: Vec<Place> = tables
            .places
            .iter()
            .filter(|p| p.kind == kind)
            .cloned()
            .collect();
        places.sort_by_key(|p| p.sort_order);
        Ok(places)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        Ok(self.tables.read().await.profiles.get(&id).cloned())
    }
}
