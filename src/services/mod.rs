pub mod cameras;
pub mod dashboard;
pub mod incidents;
pub mod settings;

pub use cameras::CameraService;
pub use dashboard::{DashboardService, DashboardSummary};
pub use incidents::{IncidentFeed, IncidentService};
pub use settings::SettingsService;
