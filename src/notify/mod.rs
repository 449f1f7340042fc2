pub mod toast;

pub use toast::ToastHub;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Toast urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Error,
    Warning,
    Info,
}

impl Display for ToastLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single operator-facing notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub title: String,
    pub body: String,
    pub timestamp_label: String,
    pub raised_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(level: ToastLevel, title: String, body: String, timestamp_label: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            title,
            body,
            timestamp_label,
            raised_at: Utc::now(),
        }
    }
}

/// Notification surface toasts are pushed into.
///
/// Fire-and-forget: there is no acknowledgement and a failed delivery is not
/// retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, toast: Toast) -> Result<()>;
}

/// Notifier that writes toasts to the process log at the matching level.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, toast: Toast) -> Result<()> {
        match toast.level {
            ToastLevel::Error => {
                error!("{} - {} ({})", toast.title, toast.body, toast.timestamp_label)
            }
            ToastLevel::Warning => {
                warn!("{} - {} ({})", toast.title, toast.body, toast.timestamp_label)
            }
            ToastLevel::Info => {
                info!("{} - {} ({})", toast.title, toast.body, toast.timestamp_label)
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_notifier_accepts_every_level() {
        for level in [ToastLevel::Error, ToastLevel::Warning, ToastLevel::Info] {
            let toast = Toast::new(
                level,
                "New Theft Incident".to_string(),
                "Platform A".to_string(),
                "08:42:10".to_string(),
            );
            LogNotifier.notify(toast).await.unwrap();
        }
    }
}
