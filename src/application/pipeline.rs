// Pipeline - Raw records plus a window spec in, render-ready dashboard out
use crate::application::aggregator::summarize;
use crate::application::chart_builder::build_chart;
use crate::application::grouping::group;
use crate::application::ingestion::validate;
use crate::application::summary_builder::build_summary;
use crate::domain::dashboard::{Dashboard, Diagnostics};
use crate::domain::error::PipelineError;
use crate::domain::telemetry::DeviceSummary;
use crate::domain::time_window::{TimeWindow, WindowSpec};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Run against the current wall clock.
pub fn run(records: &[Value], spec: &WindowSpec) -> Result<Dashboard, PipelineError> {
    run_at(records, spec, Utc::now())
}

/// Only an invalid window spec fails; malformed records and empty results
/// are reported through the diagnostics.
pub fn run_at(
    records: &[Value],
    spec: &WindowSpec,
    now: DateTime<Utc>,
) -> Result<Dashboard, PipelineError> {
    let window = spec.resolve(now)?;
    Ok(run_in_window(records, window))
}

/// Run over an already resolved window.
pub fn run_in_window(records: &[Value], window: TimeWindow) -> Dashboard {
    let batch = validate(records);
    let series = group(&batch.readings, &window);

    let summaries: Vec<DeviceSummary> = series.iter().map(summarize).collect();
    let chart = build_chart(&series, &window);
    let summary = build_summary(&summaries);

    let diagnostics = Diagnostics {
        total_records: records.len(),
        valid_count: batch.readings.len(),
        rejected_count: batch.rejected.len(),
        in_window_count: chart.total_points,
        device_count: series.len(),
        window_used: window,
        rejections: batch.rejected,
    };

    tracing::debug!(
        "Pipeline: {} records, {} valid, {} in window, {} devices ({})",
        diagnostics.total_records,
        diagnostics.valid_count,
        diagnostics.in_window_count,
        diagnostics.device_count,
        chart.window_label
    );

    Dashboard::new(chart, summary, diagnostics)
}
