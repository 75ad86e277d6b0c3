// src/models/event.rs
// DOCUMENTATION: Event records, request DTOs and public responses
// PURPOSE: Shared shape for both content backends

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{empty_as_none, ModerationStatus, Recurrence};

pub const DEFAULT_EVENT_CATEGORY: &str = "General";

/// Categories always offered by the events filter
pub const PREDEFINED_EVENT_CATEGORIES: [&str; 6] =
    ["Food", "Arts", "General", "Market", "Music", "Festival"];

/// Represents a complete event record
/// DOCUMENTATION: Both the relational table and the CMS database map into this struct
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Uuid,

    pub title: String,

    /// Calendar date; None when the CMS page carries no usable date
    pub date: Option<NaiveDate>,

    /// Free text, e.g. "10:00 - 16:00"
    pub time: String,

    pub location: String,

    pub description: String,

    pub image_url: Option<String>,

    /// Optional external link
    pub website_url: Option<String>,

    pub status: ModerationStatus,

    pub recurring: Option<Recurrence>,

    pub category: String,

    pub lat: Option<f64>,

    pub lng: Option<f64>,

    /// Signed-in user who submitted the event
    #[serde(rename = "user_id")]
    pub owner_id: Option<Uuid>,

    /// Contact details from the public submission form
    pub submitter_name: Option<String>,

    pub submitter_email: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

/// Public view of an event
/// DOCUMENTATION: Excludes submitter contact details and ownership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub status: ModerationStatus,
    pub recurring: Option<Recurrence>,
    pub category: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Event {
    pub fn to_response(&self) -> EventResponse {
        EventResponse {
            id: self.id,
            title: self.title.clone(),
            date: self.date,
            time: self.time.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            website_url: self.website_url.clone(),
            status: self.status,
            recurring: self.recurring,
            category: self.category.clone(),
            lat: self.lat,
            lng: self.lng,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == ModerationStatus::Published
    }

    /// Events without a date count as past
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date.map(|d| d >= today).unwrap_or(false)
    }
}

/// Data for inserting an event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub status: ModerationStatus,
    pub recurring: Option<Recurrence>,
    pub category: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub owner_id: Option<Uuid>,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
}

/// Full replacement of the editable fields of an event
#[derive(Debug, Clone)]
pub struct EventChanges {
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub status: ModerationStatus,
    pub recurring: Option<Recurrence>,
    pub category: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Request DTO for the signed-in create/edit forms
/// DOCUMENTATION: Used by POST /account/events, PUT /account/events/{id}
/// and PUT /admin/events/{id}
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventForm {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    pub date: NaiveDate,

    #[validate(length(min = 1, max = 100, message = "Time is required"))]
    pub time: String,

    #[validate(length(min = 1, max = 300, message = "Location is required"))]
    pub location: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub website_url: Option<String>,

    /// Only honoured on admin edits
    #[serde(default)]
    pub recurring: Option<Recurrence>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 50))]
    pub category: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
}

/// Request body for POST /api/submit-event
/// DOCUMENTATION: Every field is optional at the JSON level so that missing
/// fields produce the form's own error messages instead of a parse error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitEventRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
    #[serde(rename = "turnstileToken")]
    pub turnstile_token: Option<String>,
}

/// Status filter for admin event listings
#[derive(Debug, Deserialize)]
pub struct EventStatusQuery {
    pub status: Option<ModerationStatus>,
}

/// Query for the public events listing
#[derive(Debug, Default, Deserialize)]
pub struct EventListQuery {
    /// Include events dated before today
    #[serde(default)]
    pub include_past: bool,

    /// Category name; "All" or absent means no filter
    pub category: Option<String>,
}

/// Sort order for store listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOrder {
    /// Soonest first
    #[default]
    DateAscending,
    /// Newest submissions first
    CreatedDescending,
}

/// Store-level listing filter
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub status: Option<ModerationStatus>,
    pub owner_id: Option<Uuid>,
    pub order: EventOrder,
}

impl EventFilter {
    pub fn published() -> Self {
        Self {
            status: Some(ModerationStatus::Published),
            ..Default::default()
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.status.map_or(true, |s| event.status == s)
            && self.owner_id.map_or(true, |o| event.owner_id == Some(o))
    }

    /// Sort in place; undated events go last in date order
    pub fn sort(&self, events: &mut [Event]) {
        match self.order {
            EventOrder::DateAscending => events.sort_by(|a, b| match (a.date, b.date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }),
            EventOrder::CreatedDescending => events.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
    }
}
