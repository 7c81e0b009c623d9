// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::backend_repository::HttpReadingsRepository;
use crate::infrastructure::config::load_settings;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    compute_dashboard, get_dashboard, health_check, latest_dashboard, list_ranges,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let settings = load_settings().context("Failed to load config/dashboard")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpReadingsRepository::new(&settings.backend)?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(repository, settings.dashboard.default_range);

    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/ranges", get(list_ranges))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/latest", get(latest_dashboard))
        .route("/dashboard/compute", post(compute_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = settings
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", settings.server.bind_addr))?;
    tracing::info!(
        "Starting battery-telemetry service on {} (backend {})",
        addr,
        settings.backend.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
