use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Incident categories produced by the detection pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentType {
    Theft,
    #[serde(rename = "Unattended Object")]
    UnattendedObject,
    Vandalism,
    #[serde(rename = "Suspicious Activity")]
    SuspiciousActivity,
}

impl Display for IncidentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Theft => write!(f, "Theft"),
            Self::UnattendedObject => write!(f, "Unattended Object"),
            Self::Vandalism => write!(f, "Vandalism"),
            Self::SuspiciousActivity => write!(f, "Suspicious Activity"),
        }
    }
}

/// Incident triage status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncidentStatus {
    Active,
    Resolved,
}

impl Display for IncidentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Resolved => write!(f, "Resolved"),
        }
    }
}

/// Incident severity as reported by detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Incident model
///
/// `camera_name` is denormalized; deleting the camera leaves the incident
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub status: IncidentStatus,
    pub severity: Option<Severity>,
    pub description: String,
    pub camera_name: String,
    pub location: String,
    pub snapshot: String,
    pub timestamp: DateTime<Utc>,
}

/// Payload for recording a new incident
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncident {
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    #[serde(default = "default_new_incident_status")]
    pub status: IncidentStatus,
    pub severity: Option<Severity>,
    pub description: String,
    pub camera_name: String,
    pub location: String,
    pub snapshot: String,
}

fn default_new_incident_status() -> IncidentStatus {
    IncidentStatus::Active
}

/// Partial incident update; unset fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentUpdate {
    #[serde(rename = "type")]
    pub incident_type: Option<IncidentType>,
    pub status: Option<IncidentStatus>,
    pub severity: Option<Severity>,
    pub description: Option<String>,
    pub camera_name: Option<String>,
    pub location: Option<String>,
    pub snapshot: Option<String>,
}

impl IncidentUpdate {
    pub fn apply(self, incident: &mut Incident) {
        if let Some(incident_type) = self.incident_type {
            incident.incident_type = incident_type;
        }
        if let Some(status) = self.status {
            incident.status = status;
        }
        if let Some(severity) = self.severity {
            incident.severity = Some(severity);
        }
        if let Some(description) = self.description {
            incident.description = description;
        }
        if let Some(camera_name) = self.camera_name {
            incident.camera_name = camera_name;
        }
        if let Some(location) = self.location {
            incident.location = location;
        }
        if let Some(snapshot) = self.snapshot {
            incident.snapshot = snapshot;
        }
    }
}

/// Filtered incident query: free-text search over description, camera name
/// and type, plus exact status/type filters. Results sort newest first.
#[derive(Debug, Clone, Default)]
pub struct IncidentQuery {
    pub search: Option<String>,
    pub status: Option<IncidentStatus>,
    pub incident_type: Option<IncidentType>,
}

impl IncidentQuery {
    pub fn matches(&self, incident: &Incident) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = incident.description.to_lowercase().contains(&needle)
                || incident.camera_name.to_lowercase().contains(&needle)
                || incident
                    .incident_type
                    .to_string()
                    .to_lowercase()
                    .contains(&needle);
            if !hit {
                return false;
            }
        }
        if let Some(status) = self.status {
            if incident.status != status {
                return false;
            }
        }
        if let Some(incident_type) = self.incident_type {
            if incident.incident_type != incident_type {
                return false;
            }
        }
        true
    }
}
