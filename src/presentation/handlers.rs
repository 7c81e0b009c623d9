// HTTP request handlers
use crate::application::dashboard_service::DashboardError;
use crate::domain::dashboard::Dashboard;
use crate::domain::time_window::{WindowPreset, WindowSpec};
use crate::infrastructure::http_response::{accepts_brotli, error_response, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::window_query::WindowQuery;
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ComputeRequest {
    #[serde(default)]
    pub items: Vec<Value>,
    /// Kept as raw JSON so a bad window becomes an `InvalidWindowSpec`.
    pub window: Option<Value>,
}

#[derive(Serialize)]
struct RangeOption {
    key: &'static str,
    title: &'static str,
    spec: WindowSpec,
}

#[derive(Serialize)]
struct RefreshedDashboard<'a> {
    ticket: u64,
    published: bool,
    #[serde(flatten)]
    dashboard: &'a Dashboard,
}

#[derive(Serialize)]
struct LatestDashboard<'a> {
    ticket: u64,
    #[serde(flatten)]
    dashboard: &'a Dashboard,
}

async fn respond<T: Serialize>(data: &T, compress: bool) -> Response {
    match json_response(StatusCode::OK, data, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Quick range presets offered to the UI
pub async fn list_ranges() -> Response {
    let ranges: Vec<RangeOption> = WindowPreset::ALL
        .into_iter()
        .map(|preset| RangeOption {
            key: preset.key(),
            title: preset.title(),
            spec: preset.spec(),
        })
        .collect();

    respond(&ranges, false).await
}

/// Fetch readings for the requested window and build the dashboard
pub async fn get_dashboard(
    Query(query): Query<WindowQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let service = &state.dashboard_service;

    let spec = match query.to_spec(service.default_range()) {
        Ok(spec) => spec,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()).await,
    };

    match service.refresh(&spec).await {
        Ok(outcome) => {
            let body = RefreshedDashboard {
                ticket: outcome.ticket,
                published: outcome.published,
                dashboard: outcome.dashboard.as_ref(),
            };
            respond(&body, compress).await
        }
        Err(e @ DashboardError::Window(_)) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string()).await
        }
        Err(e @ DashboardError::Fetch { .. }) => {
            error_response(StatusCode::BAD_GATEWAY, e.to_string()).await
        }
    }
}

/// The most recently published dashboard
pub async fn latest_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.latest().await {
        Some(published) => {
            let body = LatestDashboard {
                ticket: published.ticket,
                dashboard: published.dashboard.as_ref(),
            };
            respond(&body, compress).await
        }
        None => error_response(StatusCode::NOT_FOUND, "no dashboard has been published yet").await,
    }
}

/// Build a dashboard from a posted batch without contacting the backend
pub async fn compute_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<ComputeRequest>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let service = &state.dashboard_service;
    let spec = match request.window {
        Some(window) => WindowQuery::from_json(&window)
            .and_then(|query| query.to_spec(service.default_range())),
        None => Ok(service.default_range().spec()),
    };
    let spec = match spec {
        Ok(spec) => spec,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()).await,
    };

    match service.compute(&request.items, &spec) {
        Ok(dashboard) => respond(&dashboard, compress).await,
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()).await,
    }
}
