// src/db/repository.rs
// DOCUMENTATION: Relational content backend - all SQL queries
// PURPOSE: ContentStore over the hosted PostgreSQL tables events, landmarks, places

use crate::db::store::{ContentStore, StoreResult};
use crate::errors::SiteError;
use crate::models::*;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const EVENT_COLUMNS: &str = r#"
    id, title, date, time, location, description, image_url, website_url,
    status, recurring, category, lat, lng, user_id,
    submitter_name, submitter_email, created_at
"#;

const LANDMARK_COLUMNS: &str = r#"
    id, name, description, type, distance, key_info, lat, lng,
    image_url, website_url, status, sort_order, created_at, updated_at
"#;

/// Internal struct for mapping events rows
/// DOCUMENTATION: status and recurring are TEXT columns converted in to_event()
#[derive(Debug, FromRow)]
struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub description: String,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub status: String,
    pub recurring: Option<String>,
    pub category: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub user_id: Option<Uuid>,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl EventRow {
    fn to_event(self) -> Event {
        Event {
            id: self.id,
            title: self.title,
            date: Some(self.date),
            time: self.time,
            location: self.location,
            description: self.description,
            image_url: self.image_url,
            website_url: self.website_url,
            status: ModerationStatus::from_db(&self.status),
            recurring: self.recurring.as_deref().and_then(Recurrence::from_db),
            category: self.category,
            lat: self.lat,
            lng: self.lng,
            owner_id: self.user_id,
            submitter_name: self.submitter_name,
            submitter_email: self.submitter_email,
            created_at: Some(self.created_at),
        }
    }
}

#[derive(Debug, FromRow)]
struct LandmarkRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[sqlx(rename = "type")]
    pub type_field: Option<String>,
    pub distance: Option<String>,
    pub key_info: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub status: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LandmarkRow {
    fn to_landmark(self) -> Landmark {
        Landmark {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.type_field,
            distance: self.distance,
            key_info: self.key_info,
            lat: self.lat,
            lng: self.lng,
            image_url: self.image_url,
            website_url: self.website_url,
            status: self.status.as_deref().map(ModerationStatus::from_db),
            sort_order: self.sort_order,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

#[derive(Debug, FromRow)]
struct PlaceRow {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub type_field: String,
    pub feature: String,
    pub image_url: String,
    pub website_url: String,
    pub sort_order: i32,
}

impl PlaceRow {
    fn to_place(self, kind: PlaceKind) -> Place {
        Place {
            id: self.id,
            kind,
            name: self.name,
            category: self.type_field,
            feature: self.feature,
            image_url: self.image_url,
            website_url: self.website_url,
            sort_order: self.sort_order,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> SiteError {
    log::error!("{}: {}", context, e);
    SiteError::DatabaseError(e.to_string())
}

/// PgContentStore: all database operations for site content
/// DOCUMENTATION: Uses query_as with bound parameters; ordering clauses are fixed strings
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn order_clause(order: EventOrder) -> &'static str {
        match order {
            EventOrder::DateAscending => "ORDER BY date ASC, time ASC",
            EventOrder::CreatedDescending => "ORDER BY created_at DESC",
        }
    }

    async fn fetch_event(&self, id: Uuid) -> StoreResult<Event> {
        self.get_event(id).await?.ok_or_else(|| {
            log::warn!("Event not found: {}", id);
            SiteError::NotFound(format!("Event {}", id))
        })
    }

    async fn fetch_landmark(&self, id: Uuid) -> StoreResult<Landmark> {
        self.get_landmark(id).await?.ok_or_else(|| {
            log::warn!("Landmark not found: {}", id);
            SiteError::NotFound(format!("Landmark {}", id))
        })
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_events(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        let sql = format!(
            "SELECT {} FROM events \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::uuid IS NULL OR user_id = $2) \
             {}",
            EVENT_COLUMNS,
            Self::order_clause(filter.order)
        );

        log::debug!("Listing events with filter {:?}", filter);

        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list events", e))?;

        Ok(rows.into_iter().map(|r| r.to_event()).collect())
    }

    async fn get_event(&self, id: Uuid) -> StoreResult<Option<Event>> {
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);

        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Database error fetching event", e))?;

        Ok(row.map(|r| r.to_event()))
    }

    async fn create_event(&self, event: &NewEvent) -> StoreResult<Event> {
        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO events (
                title, date, time, location, description,
                image_url, website_url, status, recurring, category,
                lat, lng, user_id, submitter_name, submitter_email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(&event.title) // $1
        .bind(event.date) // $2
        .bind(&event.time) // $3
        .bind(&event.location) // $4
        .bind(&event.description) // $5
        .bind(&event.image_url) // $6
        .bind(&event.website_url) // $7
        .bind(event.status.as_str()) // $8
        .bind(event.recurring.map(|r| r.as_str())) // $9
        .bind(&event.category) // $10
        .bind(event.lat) // $11
        .bind(event.lng) // $12
        .bind(event.owner_id) // $13
        .bind(&event.submitter_name) // $14
        .bind(&event.submitter_email) // $15
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create event", e))?;

        let created = self.fetch_event(inserted.0).await?;
        log::info!("Created event with id: {}", created.id);
        Ok(created)
    }

    async fn update_event(&self, id: Uuid, changes: &EventChanges) -> StoreResult<Event> {
        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE events
            SET title = $1,
                date = $2,
                time = $3,
                location = $4,
                description = $5,
                image_url = $6,
                website_url = $7,
                status = $8,
                recurring = $9,
                category = $10,
                lat = $11,
                lng = $12
            WHERE id = $13
            RETURNING id
            "#,
        )
        .bind(&changes.title)
        .bind(changes.date)
        .bind(&changes.time)
        .bind(&changes.location)
        .bind(&changes.description)
        .bind(&changes.image_url)
        .bind(&changes.website_url)
        .bind(changes.status.as_str())
        .bind(changes.recurring.map(|r| r.as_str()))
        .bind(&changes.category)
        .bind(changes.lat)
        .bind(changes.lng)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Update failed for event {}", id), e))?;

        let (id,) = updated.ok_or_else(|| SiteError::NotFound(format!("Event {}", id)))?;
        let event = self.fetch_event(id).await?;

        log::info!("Updated event: {} (status {})", id, event.status);
        Ok(event)
    }

    async fn set_event_status(&self, id: Uuid, status: ModerationStatus) -> StoreResult<()> {
        let rows = sqlx::query("UPDATE events SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Status change failed for event {}", id), e))?
            .rows_affected();

        if rows == 0 {
            return Err(SiteError::NotFound(format!("Event {}", id)));
        }

        log::info!("Event {} is now {}", id, status);
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> StoreResult<()> {
        let rows = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Delete failed for event {}", id), e))?
            .rows_affected();

        if rows == 0 {
            return Err(SiteError::NotFound(format!("Event {}", id)));
        }

        log::info!("Deleted event: {}", id);
        Ok(())
    }

    async fn list_landmarks(&self, status: Option<ModerationStatus>) -> StoreResult<Vec<Landmark>> {
        let sql = format!(
            "SELECT {} FROM landmarks \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC",
            LANDMARK_COLUMNS
        );

        let rows = sqlx::query_as::<_, LandmarkRow>(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list landmarks", e))?;

        Ok(rows.into_iter().map(|r| r.to_landmark()).collect())
    }

    async fn get_landmark(&self, id: Uuid) -> StoreResult<Option<Landmark>> {
        let sql = format!("SELECT {} FROM landmarks WHERE id = $1", LANDMARK_COLUMNS);

        let row = sqlx::query_as::<_, LandmarkRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Database error fetching landmark", e))?;

        Ok(row.map(|r| r.to_landmark()))
    }

    async fn create_landmark(&self, draft: &LandmarkDraft) -> StoreResult<Landmark> {
        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO landmarks (
                name, description, type, distance, key_info,
                lat, lng, image_url, website_url, status, sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.category)
        .bind(&draft.distance)
        .bind(&draft.key_info)
        .bind(draft.lat)
        .bind(draft.lng)
        .bind(&draft.image_url)
        .bind(&draft.website_url)
        .bind(draft.status.map(|s| s.as_str()))
        .bind(draft.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create landmark", e))?;

        let landmark = self.fetch_landmark(inserted.0).await?;
        log::info!("Created landmark with id: {}", landmark.id);
        Ok(landmark)
    }

    async fn update_landmark(&self, id: Uuid, draft: &LandmarkDraft) -> StoreResult<Landmark> {
        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE landmarks
            SET name = $1,
                description = $2,
                type = $3,
                distance = $4,
                key_info = $5,
                lat = $6,
                lng = $7,
                image_url = $8,
                website_url = $9,
                status = $10,
                sort_order = $11,
                updated_at = NOW()
            WHERE id = $12
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.category)
        .bind(&draft.distance)
        .bind(&draft.key_info)
        .bind(draft.lat)
        .bind(draft.lng)
        .bind(&draft.image_url)
        .bind(&draft.website_url)
        .bind(draft.status.map(|s| s.as_str()))
        .bind(draft.sort_order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Update failed for landmark {}", id), e))?;

        let (id,) = updated.ok_or_else(|| SiteError::NotFound(format!("Landmark {}", id)))?;
        let landmark = self.fetch_landmark(id).await?;

        log::info!("Updated landmark: {}", id);
        Ok(landmark)
    }

    async fn set_landmark_status(&self, id: Uuid, status: ModerationStatus) -> StoreResult<()> {
        let rows =
            sqlx::query("UPDATE landmarks SET status = $1, updated_at = NOW() WHERE id = $2")
                .bind(status.as_str())
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error(&format!("Status change failed for landmark {}", id), e))?
                .rows_affected();

        if rows == 0 {
            return Err(SiteError::NotFound(format!("Landmark {}", id)));
        }

        log::info!("Landmark {} is now {}", id, status);
        Ok(())
    }

    async fn delete_landmark(&self, id: Uuid) -> StoreResult<()> {
        let rows = sqlx::query("DELETE FROM landmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Delete failed for landmark {}", id), e))?
            .rows_affected();

        if rows == 0 {
            return Err(SiteError::NotFound(format!("Landmark {}", id)));
        }

        log::info!("Deleted landmark: {}", id);
        Ok(())
    }

    async fn list_places(&self, kind: PlaceKind) -> StoreResult<Vec<Place>> {
        let rows = sqlx::query_as::<_, PlaceRow>(
            r#"
            SELECT id, name, type, feature, image_url, website_url, sort_order
            FROM places
            WHERE kind = $1
            ORDER BY sort_order ASC, name ASC
            "#,
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to list {} places", kind.as_str()), e))?;

        Ok(rows.into_iter().map(|r| r.to_place(kind)).collect())
    }
}
