use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio::time::Duration;
use uuid::Uuid;

use super::{Notifier, Toast};
use crate::config::ToastConfig;

/// Broadcast toast surface with auto-dismissal.
///
/// Subscribers get every toast raised after they subscribe; the hub also
/// tracks the currently visible set, dismissing each toast after a fixed
/// duration and evicting the oldest once the visible cap is reached.
pub struct ToastHub {
    sender: broadcast::Sender<Toast>,
    active: Arc<RwLock<Vec<Toast>>>,
    auto_dismiss: Duration,
    max_visible: usize,
}

impl ToastHub {
    pub fn new(config: &ToastConfig) -> Self {
        let (sender, _) = broadcast::channel(64);
        Self {
            sender,
            active: Arc::new(RwLock::new(Vec::new())),
            auto_dismiss: Duration::from_secs(config.auto_dismiss_secs),
            max_visible: config.max_visible,
        }
    }

    /// Receive every toast raised from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    /// Currently visible toasts, oldest first.
    pub async fn active(&self) -> Vec<Toast> {
        self.active.read().await.clone()
    }

    async fn dismiss_later(active: Arc<RwLock<Vec<Toast>>>, id: Uuid, after: Duration) {
        tokio::time::sleep(after).await;
        active.write().await.retain(|toast| toast.id != id);
    }
}

#[async_trait]
impl Notifier for ToastHub {
    async fn notify(&self, toast: Toast) -> Result<()> {
        {
            let mut active = self.active.write().await;
            active.push(toast.clone());
            while active.len() > self.max_visible {
                active.remove(0);
            }
        }
        tokio::spawn(Self::dismiss_later(
            self.active.clone(),
            toast.id,
            self.auto_dismiss,
        ));
        // No subscribers is not an error; delivery is best-effort.
        let _ = self.sender.send(toast);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastLevel;

    fn toast(title: &str) -> Toast {
        Toast::new(
            ToastLevel::Info,
            title.to_string(),
            "Platform A".to_string(),
            "08:42:10".to_string(),
        )
    }

    #[tokio::test]
    async fn subscribers_receive_raised_toasts() {
        let hub = ToastHub::new(&ToastConfig::default());
        let mut receiver = hub.subscribe();
        hub.notify(toast("New Theft Incident")).await.unwrap();
        let received = receiver.recv().await.unwrap();
        assert_eq!(received.title, "New Theft Incident");
        assert_eq!(received.level, ToastLevel::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn toasts_auto_dismiss_after_the_configured_duration() {
        let hub = ToastHub::new(&ToastConfig {
            auto_dismiss_secs: 5,
            max_visible: 10,
        });
        hub.notify(toast("New Vandalism Incident")).await.unwrap();
        assert_eq!(hub.active().await.len(), 1);
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(hub.active().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn oldest_toast_is_evicted_at_the_visible_cap() {
        let hub = ToastHub::new(&ToastConfig {
            auto_dismiss_secs: 60,
            max_visible: 2,
        });
        hub.notify(toast("first")).await.unwrap();
        hub.notify(toast("second")).await.unwrap();
        hub.notify(toast("third")).await.unwrap();
        let active = hub.active().await;
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].title, "second");
        assert_eq!(active[1].title, "third");
    }
}
