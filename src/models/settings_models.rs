use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// Recording quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingQuality {
    Low,
    Medium,
    High,
}

/// Per-channel notification toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannels {
    pub sms: bool,
    pub email: bool,
    pub whatsapp: bool,
}

/// Outbound alert channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Sms,
    Email,
    Whatsapp,
}

impl Display for NotificationChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sms => write!(f, "sms"),
            Self::Email => write!(f, "email"),
            Self::Whatsapp => write!(f, "whatsapp"),
        }
    }
}

impl FromStr for NotificationChannel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(Self::Sms),
            "email" => Ok(Self::Email),
            "whatsapp" => Ok(Self::Whatsapp),
            other => Err(Error::Validation(format!("Invalid channel: {}", other))),
        }
    }
}

/// Process-wide notification and detection settings singleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub alert_threshold: u32,
    pub auto_resolve_timeout: u32,
    pub max_concurrent_alerts: u32,
    pub motion_sensitivity: u32,
    pub face_blur_enabled: bool,
    pub notification_channels: NotificationChannels,
    pub recording_quality: RecordingQuality,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alert_threshold: 75,
            auto_resolve_timeout: 30,
            max_concurrent_alerts: 10,
            motion_sensitivity: 65,
            face_blur_enabled: true,
            notification_channels: NotificationChannels {
                sms: true,
                email: true,
                whatsapp: false,
            },
            recording_quality: RecordingQuality::High,
            dark_mode: false,
        }
    }
}

/// Partial settings update; the channel block replaces wholesale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub alert_threshold: Option<u32>,
    pub auto_resolve_timeout: Option<u32>,
    pub max_concurrent_alerts: Option<u32>,
    pub motion_sensitivity: Option<u32>,
    pub face_blur_enabled: Option<bool>,
    pub notification_channels: Option<NotificationChannels>,
    pub recording_quality: Option<RecordingQuality>,
    pub dark_mode: Option<bool>,
}

impl SettingsUpdate {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(alert_threshold) = self.alert_threshold {
            settings.alert_threshold = alert_threshold;
        }
        if let Some(auto_resolve_timeout) = self.auto_resolve_timeout {
            settings.auto_resolve_timeout = auto_resolve_timeout;
        }
        if let Some(max_concurrent_alerts) = self.max_concurrent_alerts {
            settings.max_concurrent_alerts = max_concurrent_alerts;
        }
        if let Some(motion_sensitivity) = self.motion_sensitivity {
            settings.motion_sensitivity = motion_sensitivity;
        }
        if let Some(face_blur_enabled) = self.face_blur_enabled {
            settings.face_blur_enabled = face_blur_enabled;
        }
        if let Some(notification_channels) = self.notification_channels {
            settings.notification_channels = notification_channels;
        }
        if let Some(recording_quality) = self.recording_quality {
            settings.recording_quality = recording_quality;
        }
        if let Some(dark_mode) = self.dark_mode {
            settings.dark_mode = dark_mode;
        }
    }
}

/// Receipt returned by the stubbed test-alert call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAlertReceipt {
    pub message: String,
    pub channel: NotificationChannel,
    pub timestamp: DateTime<Utc>,
}
