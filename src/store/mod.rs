pub mod collection;
pub mod fixtures;

use anyhow::Result;
use tokio::sync::RwLock;
use tokio::time::Duration;

use crate::config::{LatencyProfile, StoreConfig};
use crate::models::{Camera, Incident, Settings};
use collection::Collection;

/// Operation classes, used to pick the simulated latency for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Get,
    Create,
    Update,
    Delete,
    Count,
}

/// In-memory backing store for cameras, incidents and the settings
/// singleton.
///
/// Owns all mutable state; constructed once at process start and handed to
/// the services by `Arc`. Every mutation happens under a single write lock
/// per collection, which is also where identifiers are assigned. All reads
/// return clones.
pub struct MockStore {
    cameras: RwLock<Collection<Camera>>,
    incidents: RwLock<Collection<Incident>>,
    settings: RwLock<Settings>,
    latency: LatencyProfile,
}

impl MockStore {
    /// Create a store seeded from the embedded fixtures.
    pub fn with_fixtures(config: &StoreConfig) -> Result<Self> {
        Ok(Self {
            cameras: RwLock::new(Collection::seed(fixtures::cameras()?)),
            incidents: RwLock::new(Collection::seed(fixtures::incidents()?)),
            settings: RwLock::new(fixtures::settings()?),
            latency: config.latency.clone(),
        })
    }

    /// Create an empty store. Tests use this with a zero latency profile for
    /// isolated, fast runs.
    pub fn empty(latency: LatencyProfile) -> Self {
        Self {
            cameras: RwLock::new(Collection::new()),
            incidents: RwLock::new(Collection::new()),
            settings: RwLock::new(Settings::default()),
            latency,
        }
    }

    /// Sleep for the configured latency of the given operation class.
    pub async fn simulate_latency(&self, op: StoreOp) {
        let ms = match op {
            StoreOp::List => self.latency.list_ms,
            StoreOp::Get => self.latency.get_ms,
            StoreOp::Create => self.latency.create_ms,
            StoreOp::Update => self.latency.update_ms,
            StoreOp::Delete => self.latency.delete_ms,
            StoreOp::Count => self.latency.count_ms,
        };
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    pub async fn list_cameras(&self) -> Vec<Camera> {
        self.cameras.read().await.all()
    }

    pub async fn get_camera(&self, id: i64) -> Option<Camera> {
        self.cameras.read().await.get(id)
    }

    pub async fn insert_camera(&self, camera: Camera) -> Camera {
        self.cameras.write().await.insert(camera)
    }

    pub async fn update_camera_with<F>(&self, id: i64, mutate: F) -> Option<Camera>
    where
        F: FnOnce(&mut Camera),
    {
        self.cameras.write().await.update_with(id, mutate)
    }

    pub async fn remove_camera(&self, id: i64) -> Option<Camera> {
        self.cameras.write().await.remove(id)
    }

    pub async fn camera_count(&self) -> usize {
        self.cameras.read().await.len()
    }

    pub async fn list_incidents(&self) -> Vec<Incident> {
        self.incidents.read().await.all()
    }

    pub async fn get_incident(&self, id: i64) -> Option<Incident> {
        self.incidents.read().await.get(id)
    }

    pub async fn insert_incident(&self, incident: Incident) -> Incident {
        self.incidents.write().await.insert(incident)
    }

    pub async fn update_incident_with<F>(&self, id: i64, mutate: F) -> Option<Incident>
    where
        F: FnOnce(&mut Incident),
    {
        self.incidents.write().await.update_with(id, mutate)
    }

    pub async fn remove_incident(&self, id: i64) -> Option<Incident> {
        self.incidents.write().await.remove(id)
    }

    pub async fn get_settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    pub async fn update_settings_with<F>(&self, mutate: F) -> Settings
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        mutate(&mut settings);
        settings.clone()
    }

    pub async fn replace_settings(&self, settings: Settings) -> Settings {
        let mut current = self.settings.write().await;
        *current = settings;
        current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    #[tokio::test]
    async fn fixture_store_seeds_all_collections() {
        let store = MockStore::with_fixtures(&StoreConfig::default()).unwrap();
        assert_eq!(store.camera_count().await, 8);
        assert_eq!(store.list_incidents().await.len(), 10);
        assert_eq!(store.get_settings().await, Settings::default());
    }

    #[tokio::test]
    async fn fresh_stores_are_isolated() {
        let first = MockStore::empty(LatencyProfile::none());
        let second = MockStore::empty(LatencyProfile::none());
        first
            .update_settings_with(|s| s.alert_threshold = 99)
            .await;
        assert_eq!(second.get_settings().await.alert_threshold, 75);
    }

    #[tokio::test]
    async fn fixture_ids_do_not_collide_with_new_inserts() {
        let store = MockStore::with_fixtures(&StoreConfig::default()).unwrap();
        let mut incident = store.get_incident(1).await.unwrap();
        incident.id = 0;
        let inserted = store.insert_incident(incident).await;
        assert_eq!(inserted.id, 11);
    }
}
