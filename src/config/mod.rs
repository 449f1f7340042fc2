use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub watcher: WatcherConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub toasts: ToastConfig,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Incident watcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatcherConfig {
    /// Interval in seconds between incident polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    30
}

/// Mock store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Simulated network latency applied per operation class
    #[serde(default)]
    pub latency: LatencyProfile,
}

/// Simulated latency in milliseconds per operation class.
///
/// Defaults mirror the delays of the mock API this store stands in for.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LatencyProfile {
    #[serde(default = "default_list_ms")]
    pub list_ms: u64,
    #[serde(default = "default_get_ms")]
    pub get_ms: u64,
    #[serde(default = "default_create_ms")]
    pub create_ms: u64,
    #[serde(default = "default_update_ms")]
    pub update_ms: u64,
    #[serde(default = "default_delete_ms")]
    pub delete_ms: u64,
    #[serde(default = "default_count_ms")]
    pub count_ms: u64,
}

fn default_list_ms() -> u64 {
    300
}

fn default_get_ms() -> u64 {
    200
}

fn default_create_ms() -> u64 {
    400
}

fn default_update_ms() -> u64 {
    350
}

fn default_delete_ms() -> u64 {
    250
}

fn default_count_ms() -> u64 {
    200
}

impl LatencyProfile {
    /// Zero-latency profile for tests.
    pub fn none() -> Self {
        Self {
            list_ms: 0,
            get_ms: 0,
            create_ms: 0,
            update_ms: 0,
            delete_ms: 0,
            count_ms: 0,
        }
    }
}

/// Toast surface configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToastConfig {
    /// Seconds a toast stays visible before auto-dismissal
    #[serde(default = "default_auto_dismiss")]
    pub auto_dismiss_secs: u64,
    /// Maximum number of concurrently visible toasts
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

fn default_auto_dismiss() -> u64 {
    5
}

fn default_max_visible() -> usize {
    10
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: LatencyProfile::default(),
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            list_ms: default_list_ms(),
            get_ms: default_get_ms(),
            create_ms: default_create_ms(),
            update_ms: default_update_ms(),
            delete_ms: default_delete_ms(),
            count_ms: default_count_ms(),
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_secs: default_auto_dismiss(),
            max_visible: default_max_visible(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watcher: WatcherConfig::default(),
            store: StoreConfig::default(),
            toasts: ToastConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Load configuration from a file or use default
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .context(format!("Failed to read config file: {:?}", path))?;

            let config = if path.extension().map_or(false, |ext| ext == "json") {
                serde_json::from_str(&config_str).context("Failed to parse JSON config")?
            } else if path.extension().map_or(false, |ext| ext == "toml") {
                toml::from_str(&config_str).context("Failed to parse TOML config")?
            } else {
                return Err(anyhow::anyhow!("Unsupported config file format"));
            };

            Ok(config)
        }
        None => Ok(Config::default()),
    }
}
