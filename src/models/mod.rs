// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod event;
pub mod landmark;
pub mod place;
pub mod profile;
pub mod status;

pub use event::*;
pub use landmark::*;
pub use place::*;
pub use profile::*;
pub use status::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Form fields arrive as "" when left blank; treat those as absent
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Envelope for list endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}
