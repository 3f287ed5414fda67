//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use crate::services::tracker::TRACKER_STORAGE_KEY;
use crate::utils::error::AppResult;
use axum::{extract::State, response::Json};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Tracker storage status
    pub storage: String,
    /// Configured storage backend
    pub storage_backend: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

fn response(status: &str, details: Option<HealthDetails>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details,
    }
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    Json(response(
        "healthy",
        Some(HealthDetails {
            storage: "not_checked".to_string(),
            storage_backend: state.settings.storage.backend.to_string(),
            uptime_seconds: get_uptime_seconds(),
        }),
    ))
}

/// Readiness check
///
/// GET /health/ready
/// Ready once the tracker slot can be read from storage, 503 otherwise
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> AppResult<Json<HealthResponse>> {
    debug!("Executing readiness check");

    state.store.get(TRACKER_STORAGE_KEY).map_err(|e| {
        warn!("Storage not ready: {}", e);
        e
    })?;

    Ok(Json(response(
        "ready",
        Some(HealthDetails {
            storage: "ok".to_string(),
            storage_backend: state.settings.storage.backend.to_string(),
            uptime_seconds: get_uptime_seconds(),
        }),
    )))
}

/// Liveness check
///
/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    debug!("Executing liveness check");
    Json(response("alive", None))
}

/// Seconds since the first health probe of this process
fn get_uptime_seconds() -> u64 {
    START_TIME.elapsed().as_secs()
}
