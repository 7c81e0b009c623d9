// Aggregator - Per-battery summary statistics
use crate::domain::telemetry::{DeviceSeries, DeviceSummary};

/// Summarize an ordered series. Total: an empty series yields a zero-count
/// summary rather than an error.
pub fn summarize(series: &DeviceSeries) -> DeviceSummary {
    let Some(latest) = series.latest() else {
        return DeviceSummary::empty(series.device_id().clone());
    };

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut mean = 0.0;
    for (i, voltage) in series.readings().iter().map(|r| r.voltage()).enumerate() {
        min = min.min(voltage);
        max = max.max(voltage);
        // Incremental mean; each term is scaled before subtracting so it stays finite.
        let n = (i + 1) as f64;
        mean += voltage / n - mean / n;
    }
    let count = series.readings().len();
    // Rounding can push the mean of near-equal values just past an extreme.
    let mean = mean.clamp(min, max);

    DeviceSummary {
        device_id: series.device_id().clone(),
        count,
        min: Some(min),
        max: Some(max),
        mean: Some(mean),
        latest_value: Some(latest.voltage()),
        latest_timestamp: Some(latest.timestamp()),
    }
}
