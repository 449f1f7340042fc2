use anyhow::Result;
use serde::Serialize;

use crate::models::Incident;
use crate::services::{CameraService, IncidentService};

/// Aggregated figures for the dashboard summary cards
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_cameras: usize,
    pub online_cameras: usize,
    pub active_incidents: usize,
    pub resolved_incidents: usize,
}

/// Read-only aggregation over the camera and incident services
#[derive(Clone)]
pub struct DashboardService {
    cameras: CameraService,
    incidents: IncidentService,
}

impl DashboardService {
    pub fn new(cameras: CameraService, incidents: IncidentService) -> Self {
        Self { cameras, incidents }
    }

    /// Fan out the four count queries concurrently
    pub async fn summary(&self) -> Result<DashboardSummary> {
        let (total_cameras, online_cameras, active_incidents, resolved_incidents) = tokio::try_join!(
            self.cameras.get_total_count(),
            self.cameras.get_online_count(),
            self.incidents.get_active_count(),
            self.incidents.get_resolved_count(),
        )?;
        Ok(DashboardSummary {
            total_cameras,
            online_cameras,
            active_incidents,
            resolved_incidents,
        })
    }

    /// The most recent incidents, newest first
    pub async fn recent_incidents(&self, limit: usize) -> Result<Vec<Incident>> {
        let mut incidents = self.incidents.get_all().await?;
        incidents.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        incidents.truncate(limit);
        Ok(incidents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatencyProfile, StoreConfig};
    use crate::store::MockStore;
    use std::sync::Arc;

    fn seeded_service() -> DashboardService {
        let config = StoreConfig {
            latency: LatencyProfile::none(),
        };
        let store = Arc::new(MockStore::with_fixtures(&config).unwrap());
        DashboardService::new(
            CameraService::new(store.clone()),
            IncidentService::new(store),
        )
    }

    #[tokio::test]
    async fn summary_aggregates_fixture_counts() {
        let service = seeded_service();
        let summary = service.summary().await.unwrap();
        assert_eq!(summary.total_cameras, 8);
        assert_eq!(summary.online_cameras, 6);
        assert_eq!(summary.active_incidents, 6);
        assert_eq!(summary.resolved_incidents, 4);
    }

    #[tokio::test]
    async fn recent_incidents_are_limited_and_ordered() {
        let service = seeded_service();
        let recent = service.recent_incidents(5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id, 10);
        assert!(recent.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
