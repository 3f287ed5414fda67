//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod budget;
pub mod health;
pub mod tracker;

use crate::config::{Settings, StorageBackend};
use crate::middleware::logging::request_logging_middleware;
use crate::services::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::services::tracker::CategoryBudgetTracker;
use crate::utils::error::{helpers::internal_error, AppResult};
use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Application state
pub struct AppState {
    pub settings: Settings,
    pub store: Arc<dyn KeyValueStore>,
    pub tracker: Mutex<CategoryBudgetTracker>,
}

impl AppState {
    pub fn new(settings: Settings, store: Arc<dyn KeyValueStore>) -> Self {
        let tracker = CategoryBudgetTracker::load(store.clone());
        Self {
            settings,
            store,
            tracker: Mutex::new(tracker),
        }
    }

    /// Lock the tracker for the duration of one request
    pub fn tracker(&self) -> AppResult<MutexGuard<'_, CategoryBudgetTracker>> {
        self.tracker
            .lock()
            .map_err(|_| internal_error("tracker lock poisoned"))
    }
}

/// Open the storage backend named in the settings
pub fn create_store(settings: &Settings) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match settings.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(
            FileStore::open(&settings.storage.dir)
                .with_context(|| format!("Failed to open storage at {:?}", settings.storage.dir))?,
        ),
    };
    info!("Tracker storage backend: {}", settings.storage.backend);
    Ok(store)
}

/// Create application router
pub fn create_router(settings: Settings, store: Arc<dyn KeyValueStore>) -> Result<Router> {
    let cors = cors_layer(&settings)?;
    let max_request_size = settings.request.max_request_size;

    let app_state = Arc::new(AppState::new(settings, store));

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_request_size));

    let mut router = Router::new()
        .route("/v1/budget/estimate", post(budget::estimate))
        .route("/v1/budget/recommend", post(budget::recommend))
        .route("/v1/budget/styles", get(budget::list_styles))
        .route(
            "/v1/tracker",
            get(tracker::get_tracker)
                .put(tracker::replace_tracker)
                .delete(tracker::reset_tracker),
        )
        .route("/v1/tracker/estimated", put(tracker::set_estimated))
        .route("/v1/tracker/categories/:name", patch(tracker::set_category))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(app_state)
        .layer(middleware_stack);

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    Ok(router)
}

fn cors_layer(settings: &Settings) -> Result<Option<CorsLayer>> {
    if !settings.security.cors_enabled {
        return Ok(None);
    }

    let origins = &settings.security.allowed_origins;
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values = origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin: {}", o)))
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any),
    ))
}
