// Grouping - Window filter, per-battery partitions, chronological order
use crate::domain::reading::{DeviceId, Reading};
use crate::domain::telemetry::DeviceSeries;
use crate::domain::time_window::TimeWindow;
use std::collections::BTreeMap;

/// Group in-window readings by battery, ascending by id.
///
/// Batteries with nothing inside the window are left out.
pub fn group(readings: &[Reading], window: &TimeWindow) -> Vec<DeviceSeries> {
    let mut partitions: BTreeMap<DeviceId, Vec<Reading>> = BTreeMap::new();

    for reading in readings.iter().filter(|r| window.contains(r.timestamp())) {
        partitions
            .entry(reading.device_id().clone())
            .or_default()
            .push(reading.clone());
    }

    partitions
        .into_iter()
        .map(|(device_id, readings)| DeviceSeries::from_unordered(device_id, readings))
        .collect()
}
