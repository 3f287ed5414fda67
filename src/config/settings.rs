//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::config::file::AppConfig;
use crate::services::storage::FileStore;
use crate::services::view::DEFAULT_DISPLAY_DAY_CAP;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Tracker storage configuration
    pub storage: StorageConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Presentation configuration
    pub view: ViewConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Where the tracker state is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => anyhow::bail!("Invalid storage backend: {} (expected 'file' or 'memory')", other),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::File => f.write_str("file"),
            StorageBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Tracker storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage backend
    pub backend: StorageBackend,
    /// Directory used by the file backend
    pub dir: PathBuf,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

/// Presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Days shown in the daily table before the overflow count
    pub display_day_cap: usize,
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage_dir = lookup("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(FileStore::default_root);

        let settings = Self {
            server: ServerConfig {
                host: var("SERVER_HOST", "127.0.0.1"),
                port: var("SERVER_PORT", "8084")
                    .parse()
                    .context("Invalid port number")?,
            },
            storage: StorageConfig {
                backend: var("STORAGE_BACKEND", "file")
                    .parse()
                    .context("Invalid STORAGE_BACKEND")?,
                dir: storage_dir,
            },
            request: RequestConfig {
                max_request_size: var("MAX_REQUEST_SIZE", "65536")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: var("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: var("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: var("RUST_LOG", "info"),
                format: var("LOG_FORMAT", "text"),
            },
            view: ViewConfig {
                display_day_cap: var("DISPLAY_DAY_CAP", &DEFAULT_DISPLAY_DAY_CAP.to_string())
                    .parse()
                    .context("Invalid display day cap")?,
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Overlay values from a JSON configuration file
    pub fn apply_file(&mut self, file: &AppConfig) -> Result<()> {
        if let Some(host) = &file.server.host {
            self.server.host = host.clone();
        }
        if let Some(port) = file.server.port {
            self.server.port = port;
        }
        if let Some(backend) = file.storage.backend {
            self.storage.backend = backend;
        }
        if let Some(dir) = &file.storage.dir {
            self.storage.dir = dir.clone();
        }
        if let Some(cap) = file.display_day_cap {
            self.view.display_day_cap = cap;
        }

        self.validate()
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        if self.view.display_day_cap == 0 {
            anyhow::bail!("Display day cap cannot be 0");
        }

        if self.storage.backend == StorageBackend::File && self.storage.dir.as_os_str().is_empty() {
            anyhow::bail!("Storage directory cannot be empty for the file backend");
        }

        EnvFilter::try_new(&self.logging.level)
            .with_context(|| format!("Invalid log level: {}", self.logging.level))?;

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[("STORAGE_DIR", "/tmp/tripbudget")])).unwrap();

        assert_eq!(settings.bind_addr(), "127.0.0.1:8084");
        assert_eq!(settings.storage.backend, StorageBackend::File);
        assert_eq!(settings.storage.dir, PathBuf::from("/tmp/tripbudget"));
        assert_eq!(settings.view.display_day_cap, 14);
        assert_eq!(settings.security.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_invalid_backend() {
        let result = Settings::from_lookup(lookup(&[("STORAGE_BACKEND", "sqlite")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_log_directive_accepted() {
        let settings = Settings::from_lookup(lookup(&[("RUST_LOG", "tripbudget=debug,tower_http=info")]));
        assert!(settings.is_ok());
    }
}
