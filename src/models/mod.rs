pub mod camera_models;
pub mod incident_models;
pub mod settings_models;

pub use camera_models::{Camera, CameraStatus, CameraUpdate, NewCamera};
pub use incident_models::{
    Incident, IncidentQuery, IncidentStatus, IncidentType, IncidentUpdate, NewIncident, Severity,
};
pub use settings_models::{
    NotificationChannel, NotificationChannels, RecordingQuality, Settings, SettingsUpdate,
    TestAlertReceipt,
};
