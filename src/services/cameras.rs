use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::error::Error;
use crate::models::{Camera, CameraStatus, CameraUpdate, NewCamera};
use crate::store::{MockStore, StoreOp};

/// Camera service for fleet management operations
#[derive(Clone)]
pub struct CameraService {
    store: Arc<MockStore>,
}

impl CameraService {
    /// Create a new camera service
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }

    /// Get all cameras
    pub async fn get_all(&self) -> Result<Vec<Camera>> {
        self.store.simulate_latency(StoreOp::List).await;
        Ok(self.store.list_cameras().await)
    }

    /// Get camera by id
    pub async fn get_by_id(&self, id: i64) -> Result<Camera> {
        self.store.simulate_latency(StoreOp::Get).await;
        self.store
            .get_camera(id)
            .await
            .ok_or_else(|| Error::not_found("Camera", id).into())
    }

    /// Add a camera to the fleet. New cameras start at full health with a
    /// fresh ping.
    pub async fn create(&self, new_camera: NewCamera) -> Result<Camera> {
        if new_camera.name.trim().is_empty()
            || new_camera.location.trim().is_empty()
            || new_camera.feed_url.trim().is_empty()
        {
            return Err(Error::Validation("Please fill in all fields".to_string()).into());
        }

        self.store.simulate_latency(StoreOp::Create).await;

        let camera = Camera {
            id: 0,
            name: new_camera.name,
            location: new_camera.location,
            feed_url: new_camera.feed_url,
            status: new_camera.status,
            health: 100,
            last_ping: Utc::now(),
        };
        let camera = self.store.insert_camera(camera).await;
        info!("Created camera {} (Id {})", camera.name, camera.id);
        Ok(camera)
    }

    /// Apply a partial update
    pub async fn update(&self, id: i64, updates: CameraUpdate) -> Result<Camera> {
        self.store.simulate_latency(StoreOp::Update).await;
        self.store
            .update_camera_with(id, |camera| updates.apply(camera))
            .await
            .ok_or_else(|| Error::not_found("Camera", id).into())
    }

    /// Remove a camera. Incidents referencing it by name are untouched.
    pub async fn delete(&self, id: i64) -> Result<Camera> {
        self.store.simulate_latency(StoreOp::Delete).await;
        let camera = self
            .store
            .remove_camera(id)
            .await
            .ok_or_else(|| Error::not_found("Camera", id))?;
        info!("Deleted camera {} (Id {})", camera.name, camera.id);
        Ok(camera)
    }

    /// Number of cameras currently Online
    pub async fn get_online_count(&self) -> Result<usize> {
        self.store.simulate_latency(StoreOp::Count).await;
        let count = self
            .store
            .list_cameras()
            .await
            .iter()
            .filter(|camera| camera.status == CameraStatus::Online)
            .count();
        Ok(count)
    }

    /// Total fleet size
    pub async fn get_total_count(&self) -> Result<usize> {
        self.store.simulate_latency(StoreOp::Count).await;
        Ok(self.store.camera_count().await)
    }

    /// Status toggle shortcut; also refreshes the last ping
    pub async fn update_status(&self, id: i64, status: CameraStatus) -> Result<Camera> {
        self.store.simulate_latency(StoreOp::Update).await;
        let camera = self
            .store
            .update_camera_with(id, |camera| {
                camera.status = status;
                camera.last_ping = Utc::now();
            })
            .await
            .ok_or_else(|| Error::not_found("Camera", id))?;
        info!("Camera {} (Id {}) marked {}", camera.name, camera.id, status);
        Ok(camera)
    }

    /// Case-insensitive search over name and location with an optional
    /// status filter
    pub async fn search(
        &self,
        search: &str,
        status: Option<CameraStatus>,
    ) -> Result<Vec<Camera>> {
        self.store.simulate_latency(StoreOp::List).await;
        let needle = search.to_lowercase();
        let cameras = self
            .store
            .list_cameras()
            .await
            .into_iter()
            .filter(|camera| {
                let hit = needle.is_empty()
                    || camera.name.to_lowercase().contains(&needle)
                    || camera.location.to_lowercase().contains(&needle);
                hit && status.map_or(true, |s| camera.status == s)
            })
            .collect();
        Ok(cameras)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatencyProfile, StoreConfig};
    use crate::error::Error;

    fn seeded_service() -> CameraService {
        let config = StoreConfig {
            latency: LatencyProfile::none(),
        };
        CameraService::new(Arc::new(MockStore::with_fixtures(&config).unwrap()))
    }

    fn new_camera(name: &str, location: &str, feed_url: &str) -> NewCamera {
        NewCamera {
            name: name.to_string(),
            location: location.to_string(),
            feed_url: feed_url.to_string(),
            status: CameraStatus::Online,
        }
    }

    #[tokio::test]
    async fn create_rejects_blank_required_fields() {
        let service = seeded_service();
        let result = service.create(new_camera("CAM-09", "  ", "feed")).await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_assigns_id_and_full_health() {
        let service = seeded_service();
        let camera = service
            .create(new_camera("CAM-09", "West Gallery", "https://example.com/9"))
            .await
            .unwrap();
        assert_eq!(camera.id, 9);
        assert_eq!(camera.health, 100);
        assert_eq!(camera.status, CameraStatus::Online);
    }

    #[tokio::test]
    async fn update_status_refreshes_last_ping() {
        let service = seeded_service();
        let before = service.get_by_id(6).await.unwrap();
        let after = service
            .update_status(6, CameraStatus::Online)
            .await
            .unwrap();
        assert_eq!(after.status, CameraStatus::Online);
        assert!(after.last_ping > before.last_ping);
    }

    #[tokio::test]
    async fn update_keeps_unset_fields() {
        let service = seeded_service();
        let before = service.get_by_id(2).await.unwrap();
        let after = service
            .update(
                2,
                CameraUpdate {
                    location: Some("Platform A - East End".to_string()),
                    ..CameraUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(after.location, "Platform A - East End");
        assert_eq!(after.name, before.name);
        assert_eq!(after.health, before.health);
    }

    #[tokio::test]
    async fn delete_unknown_camera_is_not_found() {
        let service = seeded_service();
        let err = service.delete(999).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn online_count_tracks_status_changes() {
        let service = seeded_service();
        assert_eq!(service.get_online_count().await.unwrap(), 6);
        service
            .update_status(1, CameraStatus::Offline)
            .await
            .unwrap();
        assert_eq!(service.get_online_count().await.unwrap(), 5);
        assert_eq!(service.get_total_count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn search_matches_name_and_location() {
        let service = seeded_service();
        let by_location = service.search("platform", None).await.unwrap();
        assert_eq!(by_location.len(), 2);
        let offline = service
            .search("", Some(CameraStatus::Offline))
            .await
            .unwrap();
        assert_eq!(offline.len(), 1);
        assert_eq!(offline[0].name, "CAM-06");
    }
}
