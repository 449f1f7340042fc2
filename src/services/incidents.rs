use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::error::Error;
use crate::models::{Incident, IncidentQuery, IncidentStatus, IncidentUpdate, NewIncident};
use crate::store::{MockStore, StoreOp};

/// Read boundary the incident watcher polls against.
///
/// One full re-fetch per call; no pagination, no delta cursor. This is the
/// seam where a push subscription from a detection pipeline would slot in.
#[async_trait]
pub trait IncidentFeed: Send + Sync {
    async fn list_incidents(&self) -> Result<Vec<Incident>>;
}

/// Incident service for triage operations
#[derive(Clone)]
pub struct IncidentService {
    store: Arc<MockStore>,
}

impl IncidentService {
    /// Create a new incident service
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }

    /// Get all incidents
    pub async fn get_all(&self) -> Result<Vec<Incident>> {
        self.store.simulate_latency(StoreOp::List).await;
        Ok(self.store.list_incidents().await)
    }

    /// Get incident by id
    pub async fn get_by_id(&self, id: i64) -> Result<Incident> {
        self.store.simulate_latency(StoreOp::Get).await;
        self.store
            .get_incident(id)
            .await
            .ok_or_else(|| Error::not_found("Incident", id).into())
    }

    /// Record a new incident, stamping it with the current instant
    pub async fn create(&self, new_incident: NewIncident) -> Result<Incident> {
        self.store.simulate_latency(StoreOp::Create).await;
        let incident = Incident {
            id: 0,
            incident_type: new_incident.incident_type,
            status: new_incident.status,
            severity: new_incident.severity,
            description: new_incident.description,
            camera_name: new_incident.camera_name,
            location: new_incident.location,
            snapshot: new_incident.snapshot,
            timestamp: Utc::now(),
        };
        let incident = self.store.insert_incident(incident).await;
        info!(
            "Recorded {} incident at {} (Id {})",
            incident.incident_type, incident.location, incident.id
        );
        Ok(incident)
    }

    /// Apply a partial update
    pub async fn update(&self, id: i64, updates: IncidentUpdate) -> Result<Incident> {
        self.store.simulate_latency(StoreOp::Update).await;
        self.store
            .update_incident_with(id, |incident| updates.apply(incident))
            .await
            .ok_or_else(|| Error::not_found("Incident", id).into())
    }

    /// Remove an incident
    pub async fn delete(&self, id: i64) -> Result<Incident> {
        self.store.simulate_latency(StoreOp::Delete).await;
        self.store
            .remove_incident(id)
            .await
            .ok_or_else(|| Error::not_found("Incident", id).into())
    }

    /// Number of incidents still Active
    pub async fn get_active_count(&self) -> Result<usize> {
        self.count_with_status(IncidentStatus::Active).await
    }

    /// Number of Resolved incidents
    pub async fn get_resolved_count(&self) -> Result<usize> {
        self.count_with_status(IncidentStatus::Resolved).await
    }

    async fn count_with_status(&self, status: IncidentStatus) -> Result<usize> {
        self.store.simulate_latency(StoreOp::Count).await;
        let count = self
            .store
            .list_incidents()
            .await
            .iter()
            .filter(|incident| incident.status == status)
            .count();
        Ok(count)
    }

    /// Triage shortcut for the status toggle
    pub async fn update_status(&self, id: i64, status: IncidentStatus) -> Result<Incident> {
        let incident = self
            .update(
                id,
                IncidentUpdate {
                    status: Some(status),
                    ..IncidentUpdate::default()
                },
            )
            .await?;
        info!("Incident {} marked {}", incident.id, status);
        Ok(incident)
    }

    /// Filtered listing, newest first
    pub async fn query(&self, query: &IncidentQuery) -> Result<Vec<Incident>> {
        self.store.simulate_latency(StoreOp::List).await;
        let mut incidents: Vec<Incident> = self
            .store
            .list_incidents()
            .await
            .into_iter()
            .filter(|incident| query.matches(incident))
            .collect();
        incidents.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(incidents)
    }
}

#[async_trait]
impl IncidentFeed for IncidentService {
    async fn list_incidents(&self) -> Result<Vec<Incident>> {
        self.get_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatencyProfile, StoreConfig};
    use crate::models::{IncidentType, Severity};

    fn seeded_service() -> IncidentService {
        let config = StoreConfig {
            latency: LatencyProfile::none(),
        };
        IncidentService::new(Arc::new(MockStore::with_fixtures(&config).unwrap()))
    }

    #[tokio::test]
    async fn counts_split_by_status() {
        let service = seeded_service();
        assert_eq!(service.get_active_count().await.unwrap(), 6);
        assert_eq!(service.get_resolved_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn update_status_resolves_incident() {
        let service = seeded_service();
        let incident = service
            .update_status(5, IncidentStatus::Resolved)
            .await
            .unwrap();
        assert_eq!(incident.status, IncidentStatus::Resolved);
        assert_eq!(service.get_active_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn update_keeps_unset_fields() {
        let service = seeded_service();
        let before = service.get_by_id(3).await.unwrap();
        let after = service
            .update(
                3,
                IncidentUpdate {
                    severity: Some(Severity::Medium),
                    ..IncidentUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(after.severity, Some(Severity::Medium));
        assert_eq!(after.description, before.description);
        assert_eq!(after.timestamp, before.timestamp);
    }

    #[tokio::test]
    async fn query_filters_and_sorts_newest_first() {
        let service = seeded_service();
        let thefts = service
            .query(&IncidentQuery {
                incident_type: Some(IncidentType::Theft),
                ..IncidentQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(thefts.len(), 3);
        assert!(thefts.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

        let active_platform = service
            .query(&IncidentQuery {
                search: Some("platform".to_string()),
                status: Some(IncidentStatus::Active),
                ..IncidentQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(active_platform.len(), 1);
        assert_eq!(active_platform[0].id, 10);
    }

    #[tokio::test]
    async fn get_by_id_reports_not_found() {
        let service = seeded_service();
        let err = service.get_by_id(404).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>().unwrap().to_string(),
            "Not found: Incident with Id 404 not found"
        );
    }
}
