use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use metrowatch::config;
use metrowatch::notify::ToastHub;
use metrowatch::services::{CameraService, DashboardService, IncidentService};
use metrowatch::store::MockStore;
use metrowatch::watcher::IncidentWatcher;

async fn run_app() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load_config(config_path.as_deref())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    )
    .init();
    info!("Starting MetroWatch security operations core");
    info!("Configuration loaded");

    let store = Arc::new(MockStore::with_fixtures(&config.store)?);
    info!("Mock store seeded from fixtures");

    let camera_service = CameraService::new(store.clone());
    let incident_service = IncidentService::new(store.clone());
    let dashboard = DashboardService::new(camera_service, incident_service.clone());

    let summary = dashboard.summary().await?;
    info!(
        "Fleet: {}/{} cameras online, {} active / {} resolved incidents",
        summary.online_cameras,
        summary.total_cameras,
        summary.active_incidents,
        summary.resolved_incidents
    );

    let toasts = Arc::new(ToastHub::new(&config.toasts));

    // Drain the toast surface to the terminal
    let mut toast_rx = toasts.subscribe();
    tokio::spawn(async move {
        while let Ok(toast) = toast_rx.recv().await {
            println!(
                "[{}] {} - {} ({})",
                toast.level, toast.title, toast.body, toast.timestamp_label
            );
        }
    });

    let watcher = Arc::new(IncidentWatcher::new(
        Arc::new(incident_service),
        toasts.clone(),
        &config.watcher,
    ));
    let watcher_handle = watcher.clone().start();
    info!("Incident watcher started");

    // Wait for termination signals
    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");

    watcher.shutdown();
    watcher_handle.await?;
    info!("Incident watcher stopped");

    Ok(())
}

fn main() {
    // Create a tokio runtime in the current thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    // Run our async main function
    if let Err(e) = runtime.block_on(run_app()) {
        eprintln!("Application error: {}", e);
    }
}
