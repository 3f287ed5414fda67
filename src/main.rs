//! Trip Budget Server
//!
//! HTTP service exposing the budget allocator and the category budget tracker

use anyhow::{Context, Result};
use tracing::info;

use tripbudget::config::{self, Settings};
use tripbudget::{create_router, create_store};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment first, then the optional JSON file on top
    let settings = config::load().context("Failed to load settings")?;

    init_logging(&settings)?;
    info!("{}", tripbudget::version_info());

    let store = create_store(&settings)?;
    let addr = settings.bind_addr();
    let app = create_router(settings, store)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Trip budget server started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("💰 Estimate endpoint: http://{}/v1/budget/estimate", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging system
fn init_logging(settings: &Settings) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(&settings.logging.level)
        .context("Invalid log filter")?;

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if settings.logging.format == "json" {
        // JSON format logs (production environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .finish())
    } else {
        // Human readable format (development environment)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish())
    };

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
