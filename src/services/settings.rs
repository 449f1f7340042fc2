use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::models::{NotificationChannel, Settings, SettingsUpdate, TestAlertReceipt};
use crate::store::{MockStore, StoreOp};

/// Settings service for the process-wide notification configuration
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<MockStore>,
}

impl SettingsService {
    /// Create a new settings service
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }

    /// Get the current settings
    pub async fn get(&self) -> Result<Settings> {
        self.store.simulate_latency(StoreOp::Get).await;
        Ok(self.store.get_settings().await)
    }

    /// Merge a partial update into the current settings
    pub async fn update(&self, updates: SettingsUpdate) -> Result<Settings> {
        self.store.simulate_latency(StoreOp::Update).await;
        let settings = self
            .store
            .update_settings_with(|settings| updates.apply(settings))
            .await;
        info!("Settings updated");
        Ok(settings)
    }

    /// Replace the settings with the shipped defaults
    pub async fn reset_to_defaults(&self) -> Result<Settings> {
        self.store.simulate_latency(StoreOp::Update).await;
        let settings = self.store.replace_settings(Settings::default()).await;
        info!("Settings reset to defaults");
        Ok(settings)
    }

    /// Stubbed test alert. No delivery transport exists; the receipt always
    /// reports success.
    pub async fn send_test_alert(&self, channel: NotificationChannel) -> Result<TestAlertReceipt> {
        self.store.simulate_latency(StoreOp::Create).await;
        let message = match channel {
            NotificationChannel::Sms => "SMS alert test sent successfully",
            NotificationChannel::Email => "Email alert test sent successfully",
            NotificationChannel::Whatsapp => "WhatsApp alert test sent successfully",
        };
        info!("Test {} alert requested", channel);
        Ok(TestAlertReceipt {
            message: message.to_string(),
            channel,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatencyProfile, StoreConfig};
    use crate::error::Error;
    use crate::models::{NotificationChannels, RecordingQuality};
    use std::str::FromStr;

    fn seeded_service() -> SettingsService {
        let config = StoreConfig {
            latency: LatencyProfile::none(),
        };
        SettingsService::new(Arc::new(MockStore::with_fixtures(&config).unwrap()))
    }

    #[tokio::test]
    async fn get_returns_the_seeded_settings() {
        let service = seeded_service();
        assert_eq!(service.get().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn update_merges_and_replaces_channels_wholesale() {
        let service = seeded_service();
        let updated = service
            .update(SettingsUpdate {
                alert_threshold: Some(90),
                notification_channels: Some(NotificationChannels {
                    sms: false,
                    email: true,
                    whatsapp: true,
                }),
                ..SettingsUpdate::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.alert_threshold, 90);
        assert!(!updated.notification_channels.sms);
        assert!(updated.notification_channels.whatsapp);
        // untouched fields survive the merge
        assert_eq!(updated.recording_quality, RecordingQuality::High);
        assert_eq!(updated.motion_sensitivity, 65);
    }

    #[tokio::test]
    async fn reset_restores_shipped_defaults() {
        let service = seeded_service();
        service
            .update(SettingsUpdate {
                alert_threshold: Some(10),
                dark_mode: Some(true),
                ..SettingsUpdate::default()
            })
            .await
            .unwrap();
        let settings = service.reset_to_defaults().await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_alert_receipt_names_the_channel() {
        let service = seeded_service();
        let receipt = service
            .send_test_alert(NotificationChannel::Whatsapp)
            .await
            .unwrap();
        assert_eq!(receipt.message, "WhatsApp alert test sent successfully");
        assert_eq!(receipt.channel, NotificationChannel::Whatsapp);
    }

    #[test]
    fn unknown_channel_fails_validation() {
        let err = NotificationChannel::from_str("pager").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
