// src/db/notion_store.rs
// DOCUMENTATION: Document-CMS content backend
// PURPOSE: ContentStore over four CMS databases (events, landmarks, dining, accommodation)
//
// The CMS has no notion of ownership, so owner-filtered listings are empty,
// and deletes archive the page. Landmark pages have no status property and
// are always published.

use crate::config::NotionDatabases;
use crate::db::store::{ContentStore, StoreResult};
use crate::errors::SiteError;
use crate::models::*;
use crate::services::notion_client::NotionClient;
use crate::services::notion_mapper::{self as mapper, NotionPage};
use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

pub struct NotionContentStore {
    client: NotionClient,
    databases: NotionDatabases,
}

impl NotionContentStore {
    pub fn new(client: NotionClient, databases: NotionDatabases) -> Self {
        Self { client, databases }
    }

    /// Live pages of one database
    async fn pages_in(&self, database_id: &str) -> StoreResult<Vec<NotionPage>> {
        let pages = self.client.search_pages().await?;
        Ok(pages
            .into_iter()
            .filter(|p| !p.archived && p.belongs_to(database_id))
            .collect())
    }

    /// Live page of one database, or None
    async fn page_in(&self, id: Uuid, database_id: &str) -> StoreResult<Option<NotionPage>> {
        Ok(self
            .client
            .retrieve_page(id)
            .await?
            .filter(|p| !p.archived && p.belongs_to(database_id)))
    }

    async fn require_page(&self, id: Uuid, database_id: &str, what: &str) -> StoreResult<()> {
        match self.page_in(id, database_id).await? {
            Some(_) => Ok(()),
            None => {
                log::warn!("{} not found in CMS: {}", what, id);
                Err(SiteError::NotFound(format!("{} {}", what, id)))
            }
        }
    }

    fn places_database(&self, kind: PlaceKind) -> &str {
        match kind {
            PlaceKind::Dining => &self.databases.dining,
            PlaceKind::Accommodation => &self.databases.accommodation,
        }
    }
}

#[async_trait]
impl ContentStore for NotionContentStore {
    fn backend_name(&self) -> &'static str {
        "notion"
    }

    async fn list_events(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        if filter.owner_id.is_some() {
            return Ok(Vec::new());
        }

        let mut events: Vec<Event> = self
            .pages_in(&self.databases.events)
            .await?
            .iter()
            .map(|p| Event::from(mapper::map_event(p)))
            .filter(|e| filter.matches(e))
            .collect();
        filter.sort(&mut events);
        Ok(events)
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        Ok(self
            .page_in(id, &self.databases.events)
            .await?
            .map(|p| Event::from(mapper::map_event(&p))))
    }

    async fn create_event(&self, event: &NewEvent) -> StoreResult<Event> {
        let page = self
            .client
            .create_page(&self.databases.events, mapper::new_event_properties(event))
            .await?;
        Ok(mapper::map_event(&page).into())
    }

    async fn update_event(&self, id: Uuid, changes: &EventChanges) -> StoreResult<Event> {
        self.require_page(id, &self.databases.events, "Event").await?;
        let page = self
            .client
            .update_page(
                id,
                json!({ "properties": mapper::event_change_properties(changes) }),
            )
            .await?;
        log::info!("Updated CMS event: {}", id);
        Ok(mapper::map_event(&page).into())
    }

    async fn set_event_status(&self, id: Uuid, status: ModerationStatus) -> StoreResult<()> {
        self.require_page(id, &self.databases.events, "Event").await?;
        self.client
            .update_page(
                id,
                json!({ "properties": mapper::event_status_properties(status) }),
            )
            .await?;
        log::info!("CMS event {} is now {}", id, status);
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<()> {
        self.require_page(id, &self.databases.events, "Event").await?;
        self.client.archive_page(id).await
    }

    async fn list_landmarks(&self, status: Option<ModerationStatus>) -> StoreResult<Vec<Landmark>> {
        let mut landmarks: Vec<Landmark> = self
            .pages_in(&self.databases.landmarks)
            .await?
            .iter()
            .map(|p| Landmark::from(mapper::map_landmark(p)))
            .filter(|l| status.is_none() || l.status == status)
            .collect();
        landmarks.sort_by_key(|l| l.sort_order);
        Ok(landmarks)
    }

    async fn get_landmark(&self, id: Uuid) -> StoreResult<Option<Landmark>> {
        Ok(self
            .page_in(id, &self.databases.landmarks)
            .await?
            .map(|p| Landmark::from(mapper::map_landmark(&p))))
    }

    async fn create_landmark(&self, draft: &LandmarkDraft) -> StoreResult<Landmark> {
        let page = self
            .client
            .create_page(&self.databases.landmarks, mapper::landmark_properties(draft))
            .await?;
        Ok(mapper::map_landmark(&page).into())
    }

    async fn update_landmark(&self, id: Uuid, draft: &LandmarkDraft) -> StoreResult<Landmark> {
        self.require_page(id, &self.databases.landmarks, "Landmark").await?;
        let page = self
            .client
            .update_page(id, json!({ "properties": mapper::landmark_properties(draft) }))
            .await?;
        log::info!("Updated CMS landmark: {}", id);
        Ok(mapper::map_landmark(&page).into())
    }

    async fn set_landmark_status(&self, id: Uuid, status: ModerationStatus) -> StoreResult<()> {
        log::warn!("Rejected status change to {} for CMS landmark {}", status, id);
        Err(SiteError::InvalidInput(
            "Landmark status is not supported by the CMS backend".to_string(),
        ))
    }

    async fn delete_landmark(&self, id: Uuid) -> StoreResult<()> {
        self.require_page(id, &self.databases.landmarks, "Landmark").await?;
        self.client.archive_page(id).await
    }

    async fn list_places(&self, kind: PlaceKind) -> StoreResult<Vec<Place>> {
        let mut places: Vec<Place> = self
            .pages_in(self.places_database(kind))
            .await?
            .iter()
            .map(|p| mapper::map_place(p).into_place(kind))
            .collect();
        places.sort_by_key(|p| p.sort_order);
        Ok(places)
    }
}
