// src/services/landmark_service.rs
// DOCUMENTATION: Business logic for landmarks
// PURPOSE: Public listings, map features and admin curation

use crate::db::ContentStore;
use crate::errors::SiteError;
use crate::models::{Landmark, LandmarkForm, ModerationStatus};
use crate::services::moderation::ModerationAction;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;
use uuid::Uuid;

pub struct LandmarkService;

impl LandmarkService {
    /// Published landmarks; store failures degrade to an empty list
    pub async fn list_public(store: &dyn ContentStore) -> Vec<Landmark> {
        match store.list_landmarks(Some(ModerationStatus::Published)).await {
            Ok(landmarks) => landmarks,
            Err(e) => {
                log::error!("Failed to load published landmarks: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_public(store: &dyn ContentStore, id: Uuid) -> Result<Landmark, SiteError> {
        match store.get_landmark(id).await? {
            Some(landmark) if landmark.is_published() => Ok(landmark),
            _ => Err(SiteError::NotFound(format!("Landmark {}", id))),
        }
    }

    /// Published landmarks with a position, as a GeoJSON FeatureCollection
    pub async fn map_features(store: &dyn ContentStore) -> FeatureCollection {
        let features = Self::list_public(store)
            .await
            .iter()
            .filter_map(to_feature)
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    /// Every landmark regardless of status, for the admin dashboard
    pub async fn list_all(store: &dyn ContentStore) -> Result<Vec<Landmark>, SiteError> {
        store.list_landmarks(None).await
    }

    /// Admin-created landmarks are published immediately
    pub async fn create(store: &dyn ContentStore, form: LandmarkForm) -> Result<Landmark, SiteError> {
        let draft = form.into_draft(Some(ModerationStatus::Published), 0);
        let landmark = store.create_landmark(&draft).await?;
        log::info!("Created landmark {} ({})", landmark.id, landmark.name);
        Ok(landmark)
    }

    /// Replace landmark fields, keeping status and, when omitted, sort order
    pub async fn update(
        store: &dyn ContentStore,
        id: Uuid,
        form: LandmarkForm,
    ) -> Result<Landmark, SiteError> {
        let existing = store
            .get_landmark(id)
            .await?
            .ok_or_else(|| SiteError::NotFound(format!("Landmark {}", id)))?;

        let draft = form.into_draft(existing.status, existing.sort_order);
        store.update_landmark(id, &draft).await
    }

    pub async fn moderate(
        store: &dyn ContentStore,
        id: Uuid,
        action: ModerationAction,
    ) -> Result<(), SiteError> {
        let status = action.target_status();
        store.set_landmark_status(id, status).await?;
        log::info!("Landmark {} set to {}", id, status);
        Ok(())
    }

    pub async fn delete(store: &dyn ContentStore, id: Uuid) -> Result<(), SiteError> {
        store.delete_landmark(id).await?;
        log::info!("Deleted landmark {}", id);
        Ok(())
    }
}

fn to_feature(landmark: &Landmark) -> Option<Feature> {
    let point = landmark.point()?;

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), json!(landmark.id));
    properties.insert("name".to_string(), json!(landmark.name));
    properties.insert("type".to_string(), json!(landmark.category));
    properties.insert("distance".to_string(), json!(landmark.distance));
    properties.insert("image_url".to_string(), json!(landmark.image_url));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use tokio_test::assert_ok;

    fn form(name: &str, lat: Option<f64>, lng: Option<f64>) -> LandmarkForm {
        LandmarkForm {
            name: name.to_string(),
            description: "A sight worth seeing".to_string(),
            category: Some("Historic".to_string()),
            distance: None,
            key_info: None,
            lat,
            lng,
            image_url: None,
            website_url: None,
            sort_order: None,
        }
    }

    #[tokio::test]
    async fn test_created_landmarks_are_published() {
        let store = MemoryStore::new();
        let landmark = LandmarkService::create(&store, form("Gold Hill", None, None))
            .await
            .unwrap();
        assert!(landmark.is_published());
        assert_eq!(LandmarkService::list_public(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn test_unpublished_landmark_hidden() {
        let store = MemoryStore::new();
        let landmark = LandmarkService::create(&store, form("Gold Hill", None, None))
            .await
            .unwrap();
        assert_ok!(LandmarkService::moderate(&store, landmark.id, ModerationAction::Unpublish).await);

        assert!(LandmarkService::list_public(&store).await.is_empty());
        let result = LandmarkService::get_public(&store, landmark.id).await;
        assert!(matches!(result, Err(SiteError::NotFound(_))));
        assert_eq!(LandmarkService::list_all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_status() {
        let store = MemoryStore::new();
        let landmark = LandmarkService::create(&store, form("Gold Hill", None, None))
            .await
            .unwrap();
        assert_ok!(LandmarkService::moderate(&store, landmark.id, ModerationAction::Unpublish).await);

        let updated = LandmarkService::update(&store, landmark.id, form("Gold Hill Museum", None, None))
            .await
            .unwrap();
        assert_eq!(updated.name, "Gold Hill Museum");
        assert_eq!(updated.status, Some(ModerationStatus::Pending));
    }

    #[tokio::test]
    async fn test_map_features_skip_unlocated() {
        let store = MemoryStore::new();
        assert_ok!(LandmarkService::create(&store, form("Abbey", Some(51.0056), Some(-2.1978))).await);
        assert_ok!(LandmarkService::create(&store, form("Somewhere", None, None)).await);

        let collection = LandmarkService::map_features(&store).await;
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        let geometry = feature.geometry.as_ref().unwrap();
        assert_eq!(geometry.value, Value::Point(vec![-2.1978, 51.0056]));
        assert_eq!(feature.properties.as_ref().unwrap()["name"], "Abbey");
    }

    #[tokio::test]
    async fn test_update_missing_landmark() {
        let store = MemoryStore::new();
        let result = LandmarkService::update(&store, Uuid::new_v4(), form("X", None, None)).await;
        assert!(matches!(result, Err(SiteError::NotFound(_))));
    }
}
