//! Resolves dashboard configuration and data from the environment, falling
//! back to defaults and the embedded sample document.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use charts::{DashboardConfig, DashboardError, StaticDataProvider};

pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";
pub const DATA_ENV: &str = "DASHBOARD_DATA";

const SAMPLE_DATA: &str = include_str!("../assets/sample_data.json");

pub fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

/// Reads the configuration at `path`; any failure yields the defaults.
pub fn load_config(path: Option<&Path>) -> DashboardConfig {
    let Some(path) = path else {
        info!("{CONFIG_ENV} not set; using default configuration");
        return DashboardConfig::default();
    };
    match DashboardConfig::load(path) {
        Ok(config) => {
            info!("Loaded dashboard configuration from {}", path.display());
            config
        }
        Err(e) => {
            error!(
                "Failed to load dashboard configuration from {}: {e}",
                path.display()
            );
            DashboardConfig::default()
        }
    }
}

/// Reads the data document at `path`, or the embedded sample when the path
/// is unset or unreadable. Only an invalid sample document is an error.
pub fn load_data(path: Option<&Path>) -> Result<StaticDataProvider, DashboardError> {
    match path {
        Some(path) => match StaticDataProvider::load(path) {
            Ok(provider) => {
                info!("Loaded dashboard data from {}", path.display());
                return Ok(provider);
            }
            Err(e) => {
                error!(
                    "Failed to load dashboard data from {}: {e}; using sample data",
                    path.display()
                );
            }
        },
        None => info!("{DATA_ENV} not set; using sample data"),
    }
    StaticDataProvider::from_json_str(SAMPLE_DATA)
}
