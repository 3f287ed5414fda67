//! Configuration management module
//!
//! Loads settings from environment variables and an optional JSON file

pub mod file;
pub mod settings;

pub use file::AppConfig;
pub use settings::{Settings, StorageBackend};

/// Environment settings with the default JSON file, if any, layered on top
pub fn load() -> anyhow::Result<Settings> {
    let mut settings = Settings::new()?;
    if let Some(file) = AppConfig::load_default()? {
        settings.apply_file(&file)?;
    }
    Ok(settings)
}
