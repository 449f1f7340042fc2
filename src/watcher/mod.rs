
use anyhow::Result;
use chrono::Local;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tokio_util::sync::CancellationToken;

use crate::config::WatcherConfig;
use crate::models::{Incident, Severity};
use crate::notify::{Notifier, Toast, ToastLevel};
use crate::services::IncidentFeed;

/// Diff baseline: the identifiers seen by the last successful poll.
#[derive(Debug, Default)]
struct WatcherState {
    known_ids: HashSet<i64>,
    initialized: bool,
}

/// Background poller that toasts the operator once per newly observed
/// incident, independent of whatever screen is showing.
///
/// The first successful poll only primes the baseline, so pre-existing
/// incidents do not cause a notification storm at startup. Later polls toast
/// each identifier absent from the previous snapshot, then replace the
/// baseline with the full current set - never the union - so an identifier
/// that drops out of the feed and reappears counts as new again.
pub struct IncidentWatcher {
    feed: Arc<dyn IncidentFeed>,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    state: Mutex<WatcherState>,
    cancel: CancellationToken,
}

impl IncidentWatcher {
    /// Create a new incident watcher
    pub fn new(
        feed: Arc<dyn IncidentFeed>,
        notifier: Arc<dyn Notifier>,
        config: &WatcherConfig,
    ) -> Self {
        Self {
            feed,
            notifier,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            state: Mutex::new(WatcherState::default()),
            cancel: CancellationToken::new(),
        }
    }

    /// Start polling: one immediate poll, then one per interval, until
    /// [`shutdown`](Self::shutdown) is called.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            "Starting incident watcher (poll every {:?})",
            self.poll_interval
        );
        let watcher = self;
        tokio::spawn(async move {
            let mut ticker = interval(watcher.poll_interval);

            loop {
                tokio::select! {
                    _ = watcher.cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = watcher.poll_once().await {
                            warn!("Incident poll failed: {}", e);
                        }
                    }
                }
            }

            info!("Incident watcher stopped");
        })
    }

    /// Stop polling deterministically. A poll already in flight finishes its
    /// fetch but its result is discarded. Restarting takes a fresh watcher,
    /// which re-primes its baseline like a first poll.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// One fetch-diff-notify cycle.
    ///
    /// A failed fetch leaves the baseline untouched; the next cycle diffs
    /// against the last successful snapshot.
    pub async fn poll_once(&self) -> Result<()> {
        let incidents = self.feed.list_incidents().await?;

        // A poll that was in flight when shutdown hit must neither notify
        // nor advance the baseline.
        if self.cancel.is_cancelled() {
            return Ok(());
        }

        let current: HashSet<i64> = incidents.iter().map(|incident| incident.id).collect();
        let mut state = self.state.lock().await;

        if !state.initialized {
            debug!("Incident watcher primed with {} incidents", current.len());
            state.known_ids = current;
            state.initialized = true;
            return Ok(());
        }

        for incident in incidents
            .iter()
            .filter(|incident| !state.known_ids.contains(&incident.id))
        {
            let toast = incident_toast(incident);
            debug!("New incident {}: {}", incident.id, toast.title);
            if let Err(e) = self.notifier.notify(toast).await {
                warn!("Failed to deliver incident toast: {}", e);
            }
        }

        state.known_ids = current;
        Ok(())
    }

    /// Snapshot of the current baseline.
    pub async fn known_ids(&self) -> HashSet<i64> {
        self.state.lock().await.known_ids.clone()
    }

    pub async fn is_initialized(&self) -> bool {
        self.state.lock().await.initialized
    }
}

/// Severity maps to toast urgency; unrated incidents are informational.
fn toast_level(severity: Option<Severity>) -> ToastLevel {
    match severity {
        Some(Severity::High) => ToastLevel::Error,
        Some(Severity::Medium) => ToastLevel::Warning,
        Some(Severity::Low) | None => ToastLevel::Info,
    }
}

fn incident_toast(incident: &Incident) -> Toast {
    let time_label = incident
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string();
    Toast::new(
        toast_level(incident.severity),
        format!("New {} Incident", incident.incident_type),
        incident.location.clone(),
        time_label,
    )
}
