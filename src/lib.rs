pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod store;
pub mod watcher;

// Re-export main components for easier use
pub use error::Error;
pub use notify::{LogNotifier, Notifier, Toast, ToastHub, ToastLevel};
pub use services::{
    CameraService, DashboardService, DashboardSummary, IncidentFeed, IncidentService,
    SettingsService,
};
pub use store::MockStore;
pub use watcher::IncidentWatcher;
