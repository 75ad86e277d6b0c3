// src/models/landmark.rs
// DOCUMENTATION: Landmark records and admin form DTO

use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{empty_as_none, ModerationStatus};

/// Point of interest shown on the landmarks page and map
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Landmark {
    pub id: Uuid,

    pub name: String,

    pub description: String,

    /// Landmark category, e.g. "Historic", "Viewpoint"
    #[serde(rename = "type")]
    pub category: Option<String>,

    /// Distance from the town centre as display text
    pub distance: Option<String>,

    pub key_info: Option<String>,

    pub lat: Option<f64>,

    pub lng: Option<f64>,

    pub image_url: Option<String>,

    pub website_url: Option<String>,

    /// Absent status is treated as not yet published
    pub status: Option<ModerationStatus>,

    pub sort_order: i32,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl Landmark {
    pub fn is_published(&self) -> bool {
        self.status == Some(ModerationStatus::Published)
    }

    /// Map position as (x = longitude, y = latitude)
    pub fn point(&self) -> Option<Point<f64>> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Point::new(lng, lat)),
            _ => None,
        }
    }
}

/// Full set of writable landmark fields (create and replace)
#[derive(Debug, Clone)]
pub struct LandmarkDraft {
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub distance: Option<String>,
    pub key_info: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub status: Option<ModerationStatus>,
    pub sort_order: i32,
}

/// Request DTO for POST/PUT /admin/landmarks
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LandmarkForm {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,

    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub distance: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub key_info: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub website_url: Option<String>,

    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl LandmarkForm {
    pub fn into_draft(self, status: Option<ModerationStatus>, sort_order: i32) -> LandmarkDraft {
        LandmarkDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            distance: self.distance,
            key_info: self.key_info,
            lat: self.lat,
            lng: self.lng,
            image_url: self.image_url,
            website_url: self.website_url,
            status,
            sort_order: self.sort_order.unwrap_or(sort_order),
        }
    }
}
