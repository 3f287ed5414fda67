//! Configuration module tests

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tripbudget::config::{AppConfig, Settings, StorageBackend};

fn settings_from(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| map.get(key).cloned())
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_settings_from_env_values() {
    let settings = settings_from(&[
        ("SERVER_HOST", "0.0.0.0"),
        ("SERVER_PORT", "9090"),
        ("STORAGE_BACKEND", "memory"),
        ("MAX_REQUEST_SIZE", "1024"),
        ("ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ("CORS_ENABLED", "false"),
        ("LOG_FORMAT", "json"),
        ("DISPLAY_DAY_CAP", "7"),
    ])
    .unwrap();

    assert_eq!(settings.bind_addr(), "0.0.0.0:9090");
    assert_eq!(settings.storage.backend, StorageBackend::Memory);
    assert_eq!(settings.request.max_request_size, 1024);
    assert_eq!(
        settings.security.allowed_origins,
        vec!["https://a.example".to_string(), "https://b.example".to_string()]
    );
    assert!(!settings.security.cors_enabled);
    assert_eq!(settings.logging.format, "json");
    assert_eq!(settings.view.display_day_cap, 7);
}

#[test]
fn test_settings_validation_failures() {
    let cases: &[(&str, &str)] = &[
        ("SERVER_PORT", "0"),
        ("SERVER_PORT", "not-a-port"),
        ("MAX_REQUEST_SIZE", "0"),
        ("DISPLAY_DAY_CAP", "0"),
        ("LOG_FORMAT", "xml"),
        ("CORS_ENABLED", "maybe"),
        ("STORAGE_BACKEND", "s3"),
    ];

    for &(key, value) in cases {
        assert!(settings_from(&[(key, value)]).is_err(), "{}={} should be rejected", key, value);
    }
}

#[test]
fn test_port_error_message() {
    let error = settings_from(&[("SERVER_PORT", "0")]).unwrap_err();
    assert!(error.to_string().contains("Port number cannot be 0"));
}

#[test]
fn test_file_overrides_environment() {
    let mut settings = settings_from(&[("SERVER_PORT", "9090"), ("STORAGE_DIR", "/var/lib/tripbudget")]).unwrap();
    let file = config_file(r#"{"server": {"port": 9191}, "storage": {"dir": "/srv/budget"}, "displayDayCap": 21}"#);

    let config = AppConfig::load(file.path()).unwrap();
    settings.apply_file(&config).unwrap();

    assert_eq!(settings.server.port, 9191);
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.storage.dir, PathBuf::from("/srv/budget"));
    assert_eq!(settings.view.display_day_cap, 21);
}

#[test]
fn test_malformed_file_rejected() {
    let file = config_file("{ not json");
    let error = AppConfig::load(file.path()).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config JSON"));
}

#[test]
fn test_missing_file_rejected() {
    let result = AppConfig::load(std::path::Path::new("/nonexistent/tripbudget.json"));
    assert!(result.is_err());
}
