// Chart builder - Multi-series line chart model for the renderer
use crate::domain::telemetry::{
    CHART_TITLE, ChartAxes, ChartKind, ChartModel, ChartPoint, ChartSeries, DeviceSeries,
    PALETTE_SIZE,
};
use crate::domain::time_window::TimeWindow;

/// Palette slot for the battery at `position` in legend order.
pub fn color_index(position: usize) -> usize {
    position % PALETTE_SIZE
}

pub fn build_chart(series: &[DeviceSeries], window: &TimeWindow) -> ChartModel {
    let series: Vec<ChartSeries> = series
        .iter()
        .enumerate()
        .map(|(position, s)| ChartSeries {
            device_id: s.device_id().clone(),
            name: format!("Battery {}", s.device_id()),
            color_index: color_index(position),
            points: s.readings().iter().map(ChartPoint::from).collect(),
        })
        .collect();

    let kind = if series.len() > 1 {
        ChartKind::MultiLine
    } else {
        ChartKind::Line
    };

    ChartModel {
        title: CHART_TITLE.to_string(),
        kind,
        window: *window,
        window_label: window.label(),
        total_points: series.iter().map(|s| s.points.len()).sum(),
        palette_size: PALETTE_SIZE,
        axes: ChartAxes::default(),
        series,
    }
}
