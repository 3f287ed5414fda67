//! File-based configuration loading
//!
//! Optional JSON file overriding server, storage and view settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::settings::StorageBackend;

/// Server overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Storage overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<StorageBackend>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Application configuration loaded from JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerOverrides,

    #[serde(default)]
    pub storage: StorageOverrides,

    /// Days shown in the daily table before the overflow count
    #[serde(rename = "displayDayCap", default, skip_serializing_if = "Option::is_none")]
    pub display_day_cap: Option<usize>,
}

impl AppConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| "Failed to parse config JSON")?;

        config.validate()?;

        debug!("Loaded configuration file {:?}", path);
        Ok(config)
    }

    /// Load configuration from default locations
    /// Searches in order:
    /// 1. ~/.config/tripbudget/tripbudget.json
    /// 2. ./tripbudget.json
    ///
    /// Returns `None` when neither file exists.
    pub fn load_default() -> Result<Option<Self>> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("tripbudget").join("tripbudget.json");
            if config_path.exists() {
                return Self::load(&config_path).map(Some);
            }
        }

        let local_path = Path::new("tripbudget.json");
        if local_path.exists() {
            return Self::load(local_path).map(Some);
        }

        Ok(None)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.server.port == Some(0) {
            anyhow::bail!("Port number cannot be 0");
        }

        if let Some(host) = &self.server.host {
            if host.trim().is_empty() {
                anyhow::bail!("Server host cannot be empty");
            }
        }

        if self.display_day_cap == Some(0) {
            anyhow::bail!("displayDayCap cannot be 0");
        }

        Ok(())
    }
}
