// src/models/place.rs
// DOCUMENTATION: Dining and accommodation listings

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which listing a place appears in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    Dining,
    Accommodation,
}

impl PlaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceKind::Dining => "dining",
            PlaceKind::Accommodation => "accommodation",
        }
    }
}

/// Restaurant, pub, hotel, B&B...
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: Uuid,

    pub kind: PlaceKind,

    pub name: String,

    /// e.g. "Gastropub", "Boutique Hotel"
    #[serde(rename = "type")]
    pub category: String,

    /// Short highlight shown under the name
    pub feature: String,

    pub image_url: String,

    pub website_url: String,

    pub sort_order: i32,
}
