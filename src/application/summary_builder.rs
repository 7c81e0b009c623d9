// Summary builder - One table row per battery
use crate::application::chart_builder::color_index;
use crate::domain::telemetry::{DeviceSummary, SummaryRow};

/// Rows keep the order of `summaries`, which matches the chart legend.
pub fn build_summary(summaries: &[DeviceSummary]) -> Vec<SummaryRow> {
    summaries
        .iter()
        .enumerate()
        .map(|(position, s)| SummaryRow {
            device_id: s.device_id.clone(),
            color_index: color_index(position),
            count: s.count,
            min: s.min,
            max: s.max,
            mean: s.mean,
            latest_value: s.latest_value,
            latest_timestamp: s.latest_timestamp,
        })
        .collect()
}
