// Telemetry data domain models
use super::reading::{DeviceId, Reading};
use super::time_window::TimeWindow;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of line colours the renderer cycles through.
pub const PALETTE_SIZE: usize = 8;

pub const CHART_TITLE: &str = "Battery Voltage";

/// Chronologically ordered readings for one battery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSeries {
    device_id: DeviceId,
    readings: Vec<Reading>,
}

impl DeviceSeries {
    /// Sorts `readings` by timestamp. The sort is stable, so readings that
    /// share a timestamp keep the order they were given in.
    pub fn from_unordered(device_id: DeviceId, mut readings: Vec<Reading>) -> Self {
        readings.sort_by_key(|r| r.timestamp());
        Self {
            device_id,
            readings,
        }
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }
}

/// Aggregate statistics for one battery. Numeric fields are `None` when
/// `count` is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub device_id: DeviceId,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub latest_value: Option<f64>,
    pub latest_timestamp: Option<DateTime<Utc>>,
}

impl DeviceSummary {
    pub fn empty(device_id: DeviceId) -> Self {
        Self {
            device_id,
            count: 0,
            min: None,
            max: None,
            mean: None,
            latest_value: None,
            latest_timestamp: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub time_ms: i64,
    pub voltage: f64,
}

impl ChartPoint {
    pub fn new(timestamp: DateTime<Utc>, voltage: f64) -> Self {
        Self {
            timestamp,
            time_ms: timestamp.timestamp_millis(),
            voltage,
        }
    }
}

impl From<&Reading> for ChartPoint {
    fn from(reading: &Reading) -> Self {
        ChartPoint::new(reading.timestamp(), reading.voltage())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub device_id: DeviceId,
    pub name: String,
    pub color_index: usize,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    MultiLine,
}

/// Axis and hover metadata for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartAxes {
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub y_unit: &'static str,
    pub hover_mode: &'static str,
}

impl Default for ChartAxes {
    fn default() -> Self {
        Self {
            x_title: "Time (UTC)",
            y_title: "Voltage (V)",
            y_unit: "V",
            hover_mode: "x unified",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartModel {
    pub title: String,
    pub kind: ChartKind,
    pub window: TimeWindow,
    pub window_label: String,
    pub total_points: usize,
    pub palette_size: usize,
    pub axes: ChartAxes,
    pub series: Vec<ChartSeries>,
}

/// One table row per battery, in chart legend order. Values stay numeric;
/// formatting belongs to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub device_id: DeviceId,
    pub color_index: usize,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub latest_value: Option<f64>,
    pub latest_timestamp: Option<DateTime<Utc>>,
}
