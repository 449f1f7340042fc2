use anyhow::Result;

use crate::error::Error;
use crate::models::{Camera, Incident, Settings};

const CAMERAS_JSON: &str = include_str!("fixtures/cameras.json");
const INCIDENTS_JSON: &str = include_str!("fixtures/incidents.json");
const SETTINGS_JSON: &str = include_str!("fixtures/settings.json");

pub fn cameras() -> Result<Vec<Camera>> {
    serde_json::from_str(CAMERAS_JSON)
        .map_err(|e| Error::Serialization(format!("Failed to parse camera fixtures: {}", e)).into())
}

pub fn incidents() -> Result<Vec<Incident>> {
    serde_json::from_str(INCIDENTS_JSON).map_err(|e| {
        Error::Serialization(format!("Failed to parse incident fixtures: {}", e)).into()
    })
}

pub fn settings() -> Result<Settings> {
    serde_json::from_str(SETTINGS_JSON).map_err(|e| {
        Error::Serialization(format!("Failed to parse settings fixtures: {}", e)).into()
    })
}
