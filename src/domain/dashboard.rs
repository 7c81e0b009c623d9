// Dashboard domain model - The render-ready result of one pipeline run
use super::error::RejectReason;
use super::telemetry::{ChartModel, SummaryRow};
use super::time_window::TimeWindow;
use serde::Serialize;
use serde_json::Value;

/// A raw record that failed validation, with its position in the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub record: Value,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub total_records: usize,
    pub valid_count: usize,
    pub rejected_count: usize,
    pub in_window_count: usize,
    pub device_count: usize,
    pub window_used: TimeWindow,
    pub rejections: Vec<Rejection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub chart: ChartModel,
    pub summary: Vec<SummaryRow>,
    pub diagnostics: Diagnostics,
}

impl Dashboard {
    pub fn new(chart: ChartModel, summary: Vec<SummaryRow>, diagnostics: Diagnostics) -> Self {
        Self {
            chart,
            summary,
            diagnostics,
        }
    }

    /// No battery had a reading in the window. Still a renderable state.
    pub fn is_empty(&self) -> bool {
        self.chart.series.is_empty()
    }
}
