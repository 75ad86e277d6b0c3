// src/services/event_service.rs
// DOCUMENTATION: Business logic for events
// PURPOSE: Intermediary between handlers and the content store, applies moderation rules

use crate::db::ContentStore;
use crate::errors::SiteError;
use crate::models::{
    CurrentUser, Event, EventChanges, EventFilter, EventForm, EventListQuery, EventOrder,
    EventResponse, ModerationStatus, NewEvent, DEFAULT_EVENT_CATEGORY,
    PREDEFINED_EVENT_CATEGORIES,
};
use crate::services::moderation::{self, ModerationAction};
use chrono::NaiveDate;
use uuid::Uuid;

/// Category value that disables filtering
pub const ALL_CATEGORIES: &str = "All";

pub struct EventService;

impl EventService {
    /// Published events for the public listing
    /// DOCUMENTATION: Upcoming only unless `include_past`, soonest first.
    /// Store failures are logged and yield an empty list.
    pub async fn list_public(
        store: &dyn ContentStore,
        query: &EventListQuery,
        today: NaiveDate,
    ) -> Vec<EventResponse> {
        let events = match store.list_events(&EventFilter::published()).await {
            Ok(events) => events,
            Err(e) => {
                log::error!("Failed to load published events: {}", e);
                return Vec::new();
            }
        };

        let category = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

        events
            .iter()
            .filter(|e| e.is_published())
            .filter(|e| query.include_past || e.is_upcoming(today))
            .filter(|e| category.map_or(true, |c| e.category == c))
            .map(Event::to_response)
            .collect()
    }

    /// Filter options: "All", categories in use, then the predefined ones
    pub fn categories(events: &[EventResponse]) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        let present = events.iter().map(|e| e.category.as_str());
        for category in present.chain(PREDEFINED_EVENT_CATEGORIES) {
            if !category.is_empty() && !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
        categories
    }

    /// Single published event; pending events are hidden from the public
    pub async fn get_public(store: &dyn ContentStore, id: Uuid) -> Result<EventResponse, SiteError> {
        match store.get_event(id).await? {
            Some(event) if event.is_published() => Ok(event.to_response()),
            _ => Err(SiteError::NotFound(format!("Event {}", id))),
        }
    }

    pub async fn get(store: &dyn ContentStore, id: Uuid) -> Result<Event, SiteError> {
        store
            .get_event(id)
            .await?
            .ok_or_else(|| SiteError::NotFound(format!("Event {}", id)))
    }

    /// Events submitted by the signed-in user, newest first
    pub async fn list_for_owner(
        store: &dyn ContentStore,
        user: &CurrentUser,
    ) -> Result<Vec<Event>, SiteError> {
        store
            .list_events(&EventFilter {
                status: None,
                owner_id: Some(user.id()),
                order: EventOrder::CreatedDescending,
            })
            .await
    }

    /// Admin listing, optionally by status, newest first
    pub async fn list_by_status(
        store: &dyn ContentStore,
        status: Option<ModerationStatus>,
    ) -> Result<Vec<Event>, SiteError> {
        store
            .list_events(&EventFilter {
                status,
                owner_id: None,
                order: EventOrder::CreatedDescending,
            })
            .await
    }

    /// New event from a signed-in user; always enters the queue as pending
    pub async fn create_for_user(
        store: &dyn ContentStore,
        user: &CurrentUser,
        form: EventForm,
    ) -> Result<Event, SiteError> {
        let event = NewEvent {
            title: form.title.trim().to_string(),
            date: form.date,
            time: form.time.trim().to_string(),
            location: form.location.trim().to_string(),
            description: form.description.trim().to_string(),
            image_url: form.image_url,
            website_url: form.website_url,
            status: ModerationStatus::Pending,
            recurring: None,
            category: form
                .category
                .unwrap_or_else(|| DEFAULT_EVENT_CATEGORY.to_string()),
            lat: form.lat,
            lng: form.lng,
            owner_id: Some(user.id()),
            submitter_name: Some(user.display_name().to_string()),
            submitter_email: Some(user.auth.email.clone()),
        };

        let created = store.create_event(&event).await?;
        log::info!("User {} submitted event {}", user.id(), created.id);
        Ok(created)
    }

    /// Replace the editable fields of an event
    /// DOCUMENTATION: Owners and admins only. A non-admin edit sends the
    /// event back to pending; an admin edit keeps the status and may change
    /// the recurrence.
    pub async fn edit(
        store: &dyn ContentStore,
        editor: &CurrentUser,
        id: Uuid,
        form: EventForm,
    ) -> Result<Event, SiteError> {
        let existing = Self::get(store, id).await?;
        moderation::ensure_can_edit_event(editor, &existing)?;

        let status = moderation::status_after_edit(existing.status, editor.is_admin());
        let recurring = if editor.is_admin() {
            form.recurring
        } else {
            existing.recurring
        };

        let changes = EventChanges {
            title: form.title.trim().to_string(),
            date: form.date,
            time: form.time.trim().to_string(),
            location: form.location.trim().to_string(),
            description: form.description.trim().to_string(),
            image_url: form.image_url,
            website_url: form.website_url,
            status,
            recurring,
            category: form.category.unwrap_or(existing.category),
            lat: form.lat,
            lng: form.lng,
        };

        let updated = store.update_event(id, &changes).await?;
        if existing.status != updated.status {
            log::info!("Event {} returned to moderation after edit by {}", id, editor.id());
        }
        Ok(updated)
    }

    /// Delete an event the caller owns (or any event, for admins)
    pub async fn delete(
        store: &dyn ContentStore,
        editor: &CurrentUser,
        id: Uuid,
    ) -> Result<(), SiteError> {
        let existing = Self::get(store, id).await?;
        moderation::ensure_can_edit_event(editor, &existing)?;
        store.delete_event(id).await?;
        log::info!("Event {} deleted by {}", id, editor.id());
        Ok(())
    }

    pub async fn moderate(
        store: &dyn ContentStore,
        id: Uuid,
        action: ModerationAction,
    ) -> Result<Event, SiteError> {
        let status = action.target_status();
        store.set_event_status(id, status).await?;
        log::info!("Event {} set to {}", id, status);
        Self::get(store, id).await
    }
}
