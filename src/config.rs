//! Dashboard Configuration Module
//! Data file locations and display settings, loaded from an optional JSON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "FUNDING_DASHBOARD_CONFIG";

/// Config file looked up in the working directory when no override is set.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Locations of the three input tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Primary 17-column funding table.
    pub funding: PathBuf,
    /// Global reference table (Industry, Country, Year Founded, ...).
    pub global: PathBuf,
    /// India reference table (Industry Vertical, City  Location, ...).
    pub india: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            funding: PathBuf::from("data/cleaned_data.csv"),
            global: PathBuf::from("data/global_data.csv"),
            india: PathBuf::from("data/startup_funding_india.csv"),
        }
    }
}

/// How many entries each ranked chart or table keeps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopNSettings {
    pub vertical_pie: usize,
    pub startup_bar: usize,
    pub city_bar: usize,
    pub region_bar: usize,
    pub recent_investments: usize,
}

impl Default for TopNSettings {
    fn default() -> Self {
        Self {
            vertical_pie: 4,
            startup_bar: 5,
            city_bar: 10,
            region_bar: 10,
            recent_investments: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub window_title: String,
    pub data: DataPaths,
    pub top_n: TopNSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_title: "Startup Funding Analysis".to_string(),
            data: DataPaths::default(),
            top_n: TopNSettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from the path in `FUNDING_DASHBOARD_CONFIG`, else `dashboard.json`.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }
}
