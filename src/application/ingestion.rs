// Ingestion - Turns raw backend items into validated readings
use crate::domain::dashboard::Rejection;
use crate::domain::reading::Reading;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedBatch {
    pub readings: Vec<Reading>,
    pub rejected: Vec<Rejection>,
}

/// Split a batch into readings and rejections. Valid readings keep their
/// input order and a malformed record never stops the rest of the batch.
pub fn validate(records: &[Value]) -> ValidatedBatch {
    let mut batch = ValidatedBatch::default();

    for (index, record) in records.iter().enumerate() {
        match Reading::from_record(record) {
            Ok(reading) => batch.readings.push(reading),
            Err(reason) => {
                tracing::debug!("Rejected record {}: {}", index, reason);
                batch.rejected.push(Rejection {
                    index,
                    record: record.clone(),
                    reason,
                });
            }
        }
    }

    if !batch.rejected.is_empty() {
        tracing::warn!(
            "Rejected {} of {} records",
            batch.rejected.len(),
            records.len()
        );
    }

    batch
}
