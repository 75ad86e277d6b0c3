// src/services/place_service.rs
// DOCUMENTATION: Business logic for dining and accommodation listings
// PURPOSE: Intermediary between handlers and the content store

use crate::db::ContentStore;
use crate::models::{Place, PlaceKind};

pub struct PlaceService;

impl PlaceService {
    /// Places of one kind; store failures are logged and yield an empty list
    pub async fn list(store: &dyn ContentStore, kind: PlaceKind) -> Vec<Place> {
        match store.list_places(kind).await {
            Ok(places) => {
                log::debug!("Loaded {} {} places", places.len(), kind.as_str());
                places
            }
            Err(e) => {
                log::error!("Failed to load {} places: {}", kind.as_str(), e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use uuid::Uuid;

    fn place(kind: PlaceKind, name: &str, sort_order: i32) -> Place {
        Place {
            id: Uuid::new_v4(),
            kind,
            name: name.to_string(),
            category: "Pub".to_string(),
            feature: "Open fire".to_string(),
            image_url: String::new(),
            website_url: String::new(),
            sort_order,
        }
    }

    #[tokio::test]
    async fn test_lists_only_requested_kind_in_order() {
        let store = MemoryStore::new();
        store.insert_place(place(PlaceKind::Dining, "Mitre", 2)).await;
        store.insert_place(place(PlaceKind::Dining, "Grosvenor", 1)).await;
        store.insert_place(place(PlaceKind::Accommodation, "Retreat", 1)).await;

        let dining = PlaceService::list(&store, PlaceKind::Dining).await;
        let names: Vec<&str> = dining.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Grosvenor", "Mitre"]);

        let stays = PlaceService::list(&store, PlaceKind::Accommodation).await;
        assert_eq!(stays.len(), 1);
    }
}
