// Dashboard service - Fetch, run the pipeline and publish the newest result
use crate::application::pipeline;
use crate::application::readings_repository::{ReadingsQuery, ReadingsRepository};
use crate::application::refresh::{Published, RefreshSequencer};
use crate::domain::dashboard::Dashboard;
use crate::domain::error::PipelineError;
use crate::domain::time_window::{WindowPreset, WindowSpec, resolve};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Window(#[from] PipelineError),

    #[error("failed to fetch readings: {details}")]
    Fetch { details: String },
}

#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub ticket: u64,
    /// False when a later refresh finished first and this result was dropped.
    pub published: bool,
    pub dashboard: Arc<Dashboard>,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn ReadingsRepository>,
    sequencer: Arc<RefreshSequencer>,
    default_range: WindowPreset,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn ReadingsRepository>, default_range: WindowPreset) -> Self {
        Self {
            repository,
            sequencer: Arc::new(RefreshSequencer::new()),
            default_range,
        }
    }

    pub fn default_range(&self) -> WindowPreset {
        self.default_range
    }

    pub async fn refresh(&self, spec: &WindowSpec) -> Result<RefreshOutcome, DashboardError> {
        let ticket = self.sequencer.begin();
        let start_time = Instant::now();

        let window = resolve(spec)?;
        if window.is_unbounded() {
            tracing::debug!("Refresh {} fetching all readings", ticket);
        }
        let query = ReadingsQuery::from(&window);

        let records = self.repository.fetch_readings(&query).await.map_err(|e| {
            tracing::warn!("Refresh {} failed to fetch readings: {:#}", ticket, e);
            DashboardError::Fetch {
                details: format!("{:#}", e),
            }
        })?;

        let dashboard = Arc::new(pipeline::run_in_window(&records, window));
        let published = self.sequencer.publish(ticket, dashboard.clone()).await;
        if dashboard.is_empty() {
            tracing::info!(
                "Refresh {} found no readings in {}",
                ticket,
                dashboard.chart.window_label
            );
        }

        tracing::info!(
            "Refresh {} ({}): {} devices, {} points, {} rejected in {}ms",
            ticket,
            dashboard.chart.window_label,
            dashboard.diagnostics.device_count,
            dashboard.diagnostics.in_window_count,
            dashboard.diagnostics.rejected_count,
            start_time.elapsed().as_millis()
        );

        Ok(RefreshOutcome {
            ticket,
            published,
            dashboard,
        })
    }

    pub async fn latest(&self) -> Option<Published> {
        self.sequencer.latest().await
    }

    /// Run the pipeline over a caller-supplied batch without touching the backend.
    pub fn compute(
        &self,
        records: &[Value],
        spec: &WindowSpec,
    ) -> Result<Dashboard, PipelineError> {
        pipeline::run(records, spec)
    }
}
