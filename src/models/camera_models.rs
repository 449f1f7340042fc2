use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Camera connectivity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraStatus {
    Online,
    Offline,
    Maintenance,
}

impl Display for CameraStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "Online"),
            Self::Offline => write!(f, "Offline"),
            Self::Maintenance => write!(f, "Maintenance"),
        }
    }
}

/// Camera model
///
/// Field names follow the mock API wire shape (camelCase, `Id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    #[serde(rename = "Id")]
    pub id: i64,
    pub name: String,
    pub location: String,
    pub feed_url: String,
    pub status: CameraStatus,
    /// Health score, 0-100
    pub health: u8,
    pub last_ping: DateTime<Utc>,
}

/// Payload for creating a camera via the add-camera flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCamera {
    pub name: String,
    pub location: String,
    pub feed_url: String,
    #[serde(default = "default_new_camera_status")]
    pub status: CameraStatus,
}

fn default_new_camera_status() -> CameraStatus {
    CameraStatus::Online
}

/// Partial camera update; unset fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub feed_url: Option<String>,
    pub status: Option<CameraStatus>,
    pub health: Option<u8>,
    pub last_ping: Option<DateTime<Utc>>,
}

impl CameraUpdate {
    pub fn apply(self, camera: &mut Camera) {
        if let Some(name) = self.name {
            camera.name = name;
        }
        if let Some(location) = self.location {
            camera.location = location;
        }
        if let Some(feed_url) = self.feed_url {
            camera.feed_url = feed_url;
        }
        if let Some(status) = self.status {
            camera.status = status;
        }
        if let Some(health) = self.health {
            camera.health = health;
        }
        if let Some(last_ping) = self.last_ping {
            camera.last_ping = last_ping;
        }
    }
}
