// src/services/notion_mapper.rs
// DOCUMENTATION: CMS page <-> application record mapping
// PURPOSE: Flatten typed CMS properties into records, and build property payloads for writes
//
// Every reader is total: a missing property, a property of another type or
// an empty value yields the reader's default ("" or 0).

use crate::models::{
    Event, EventChanges, Landmark, LandmarkDraft, ModerationStatus, NewEvent, Place, PlaceKind,
    DEFAULT_EVENT_CATEGORY,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// CMS limit on a single rich text fragment
const MAX_TEXT_FRAGMENT: usize = 2000;

/// Generic CMS page object
#[derive(Debug, Clone, Deserialize)]
pub struct NotionPage {
    pub id: Uuid,

    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub parent: Option<NotionParent>,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotionParent {
    #[serde(default)]
    pub database_id: Option<String>,
}

impl NotionPage {
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// True when the page's parent database is `database_id` (hyphens ignored)
    pub fn belongs_to(&self, database_id: &str) -> bool {
        let wanted = normalize_id(database_id);
        !wanted.is_empty()
            && self
                .parent
                .as_ref()
                .and_then(|p| p.database_id.as_deref())
                .map(|id| normalize_id(id) == wanted)
                .unwrap_or(false)
    }
}

fn normalize_id(id: &str) -> String {
    id.replace('-', "").to_lowercase()
}

// ==================== Property readers ====================

/// The property's payload when its declared type is `kind`
fn typed<'a>(prop: Option<&'a Value>, kind: &str) -> Option<&'a Value> {
    let prop = prop?;
    if prop.get("type")?.as_str()? != kind {
        return None;
    }
    prop.get(kind)
}

fn first_plain_text(fragments: &Value) -> Option<String> {
    fragments
        .as_array()?
        .first()?
        .get("plain_text")?
        .as_str()
        .map(str::to_string)
}

pub fn rich_text(prop: Option<&Value>) -> String {
    typed(prop, "rich_text")
        .and_then(first_plain_text)
        .unwrap_or_default()
}

pub fn title(prop: Option<&Value>) -> String {
    typed(prop, "title")
        .and_then(first_plain_text)
        .unwrap_or_default()
}

pub fn url(prop: Option<&Value>) -> String {
    typed(prop, "url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn number(prop: Option<&Value>) -> f64 {
    typed(prop, "number").and_then(Value::as_f64).unwrap_or(0.0)
}

/// Start of a date property, as written by the CMS ("2025-06-01" or a datetime)
pub fn date(prop: Option<&Value>) -> String {
    typed(prop, "date")
        .and_then(|d| d.get("start"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn select(prop: Option<&Value>) -> String {
    typed(prop, "select")
        .and_then(|s| s.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// URL of the first attachment, external or CMS-hosted
pub fn files(prop: Option<&Value>) -> String {
    typed(prop, "files")
        .and_then(Value::as_array)
        .and_then(|files| files.first())
        .and_then(|file| {
            file.get("external")
                .and_then(|e| e.get("url"))
                .or_else(|| file.get("file").and_then(|f| f.get("url")))
        })
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// ==================== Flat CMS records ====================

/// Landmark as stored in the CMS, defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct CmsLandmark {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub distance: String,
    pub key_info: String,
    pub lat: f64,
    pub lng: f64,
    pub image_url: String,
    pub sort_order: f64,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CmsEvent {
    pub id: Uuid,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub status: String,
    pub category: String,
    pub image_url: String,
    pub submitter_name: String,
    pub submitter_email: String,
    pub created_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CmsPlace {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub feature: String,
    pub image_url: String,
    pub website_url: String,
    pub sort_order: f64,
}

pub fn map_landmark(page: &NotionPage) -> CmsLandmark {
    CmsLandmark {
        id: page.id,
        name: rich_text(page.prop("name")),
        description: rich_text(page.prop("description")),
        category: rich_text(page.prop("type")),
        distance: rich_text(page.prop("distance")),
        key_info: rich_text(page.prop("key_info")),
        lat: number(page.prop("lat")),
        lng: number(page.prop("lng")),
        image_url: url(page.prop("image_url")),
        sort_order: number(page.prop("sort_order")),
        created_time: page.created_time,
        last_edited_time: page.last_edited_time,
    }
}

pub fn map_event(page: &NotionPage) -> CmsEvent {
    let category = select(page.prop("Category"));
    CmsEvent {
        id: page.id,
        title: title(page.prop("Event Name")),
        date: date(page.prop("Date")),
        time: rich_text(page.prop("Time")),
        location: rich_text(page.prop("Location")),
        description: rich_text(page.prop("Description")),
        status: select(page.prop("Status")),
        category: if category.is_empty() {
            DEFAULT_EVENT_CATEGORY.to_string()
        } else {
            category
        },
        image_url: files(page.prop("Image")),
        submitter_name: rich_text(page.prop("Submitter Name")),
        submitter_email: rich_text(page.prop("Submitter Email")),
        created_time: page.created_time,
    }
}

pub fn map_place(page: &NotionPage) -> CmsPlace {
    CmsPlace {
        id: page.id,
        name: rich_text(page.prop("name")),
        category: rich_text(page.prop("type")),
        feature: rich_text(page.prop("feature")),
        image_url: url(page.prop("image_url")),
        website_url: url(page.prop("website_url")),
        sort_order: number(page.prop("sort_order")),
    }
}

// ==================== Conversion to application records ====================

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Leading YYYY-MM-DD of a CMS date or datetime
fn parse_cms_date(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// CMS select name -> moderation status; only "Approved" publishes
pub fn event_status_from_cms(name: &str) -> ModerationStatus {
    if name == "Approved" {
        ModerationStatus::Published
    } else {
        ModerationStatus::Pending
    }
}

pub fn event_status_to_cms(status: ModerationStatus) -> &'static str {
    match status {
        ModerationStatus::Published => "Approved",
        ModerationStatus::Pending => "Pending",
    }
}

impl From<CmsEvent> for Event {
    fn from(cms: CmsEvent) -> Self {
        Event {
            id: cms.id,
            title: cms.title,
            date: parse_cms_date(&cms.date),
            time: cms.time,
            location: cms.location,
            description: cms.description,
            image_url: non_empty(cms.image_url),
            website_url: None,
            status: event_status_from_cms(&cms.status),
            recurring: None,
            category: cms.category,
            lat: None,
            lng: None,
            owner_id: None,
            submitter_name: non_empty(cms.submitter_name),
            submitter_email: non_empty(cms.submitter_email),
            created_at: cms.created_time,
        }
    }
}

impl From<CmsLandmark> for Landmark {
    fn from(cms: CmsLandmark) -> Self {
        // 0/0 is the reader default, not a real position
        let located = cms.lat != 0.0 || cms.lng != 0.0;
        Landmark {
            id: cms.id,
            name: cms.name,
            description: cms.description,
            category: non_empty(cms.category),
            distance: non_empty(cms.distance),
            key_info: non_empty(cms.key_info),
            lat: located.then_some(cms.lat),
            lng: located.then_some(cms.lng),
            image_url: non_empty(cms.image_url),
            website_url: None,
            // The landmarks database has no status property
            status: Some(ModerationStatus::Published),
            sort_order: cms.sort_order as i32,
            created_at: cms.created_time,
            updated_at: cms.last_edited_time.or(cms.created_time),
        }
    }
}

impl CmsPlace {
    pub fn into_place(self, kind: PlaceKind) -> Place {
        Place {
            id: self.id,
            kind,
            name: self.name,
            category: self.category,
            feature: self.feature,
            image_url: self.image_url,
            website_url: self.website_url,
            sort_order: self.sort_order as i32,
        }
    }
}

// ==================== Property payloads for writes ====================

fn text_fragments(content: &str) -> Value {
    let chars: Vec<char> = content.chars().collect();
    let fragments: Vec<Value> = chars
        .chunks(MAX_TEXT_FRAGMENT)
        .map(|chunk| json!({ "text": { "content": chunk.iter().collect::<String>() } }))
        .collect();
    Value::Array(fragments)
}

pub fn rich_text_value(content: &str) -> Value {
    json!({ "rich_text": text_fragments(content) })
}

pub fn title_value(content: &str) -> Value {
    json!({ "title": text_fragments(content) })
}

pub fn date_value(day: NaiveDate) -> Value {
    json!({ "date": { "start": day.format("%Y-%m-%d").to_string() } })
}

pub fn select_value(name: &str) -> Value {
    json!({ "select": { "name": name } })
}

pub fn url_value(link: Option<&str>) -> Value {
    json!({ "url": link })
}

pub fn number_value(n: Option<f64>) -> Value {
    json!({ "number": n })
}

/// Single external attachment, or no attachments
pub fn files_value(link: Option<&str>) -> Value {
    match link {
        Some(link) => json!({
            "files": [{ "name": "image", "type": "external", "external": { "url": link } }]
        }),
        None => json!({ "files": [] }),
    }
}

/// Properties for a new event submission page
pub fn new_event_properties(event: &NewEvent) -> Value {
    let mut props = Map::new();
    props.insert("Event Name".into(), title_value(&event.title));
    props.insert("Date".into(), date_value(event.date));
    props.insert("Time".into(), rich_text_value(&event.time));
    props.insert("Location".into(), rich_text_value(&event.location));
    props.insert("Description".into(), rich_text_value(&event.description));
    props.insert(
        "Submitter Name".into(),
        rich_text_value(event.submitter_name.as_deref().unwrap_or_default()),
    );
    props.insert(
        "Submitter Email".into(),
        rich_text_value(event.submitter_email.as_deref().unwrap_or_default()),
    );
    props.insert(
        "Status".into(),
        select_value(event_status_to_cms(event.status)),
    );
    if event.category != DEFAULT_EVENT_CATEGORY {
        props.insert("Category".into(), select_value(&event.category));
    }
    if event.image_url.is_some() {
        props.insert("Image".into(), files_value(event.image_url.as_deref()));
    }
    Value::Object(props)
}

pub fn event_change_properties(changes: &EventChanges) -> Value {
    json!({
        "Event Name": title_value(&changes.title),
        "Date": date_value(changes.date),
        "Time": rich_text_value(&changes.time),
        "Location": rich_text_value(&changes.location),
        "Description": rich_text_value(&changes.description),
        "Status": select_value(event_status_to_cms(changes.status)),
        "Category": select_value(&changes.category),
        "Image": files_value(changes.image_url.as_deref()),
    })
}

pub fn event_status_properties(status: ModerationStatus) -> Value {
    json!({ "Status": select_value(event_status_to_cms(status)) })
}

pub fn landmark_properties(draft: &LandmarkDraft) -> Value {
    json!({
        "name": rich_text_value(&draft.name),
        "description": rich_text_value(&draft.description),
        "type": rich_text_value(draft.category.as_deref().unwrap_or_default()),
        "distance": rich_text_value(draft.distance.as_deref().unwrap_or_default()),
        "key_info": rich_text_value(draft.key_info.as_deref().unwrap_or_default()),
        "lat": number_value(draft.lat),
        "lng": number_value(draft.lng),
        "image_url": url_value(draft.image_url.as_deref()),
        "sort_order": number_value(Some(draft.sort_order as f64)),
    })
}
