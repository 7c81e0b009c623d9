// Reading domain model - A validated voltage sample for one battery
use super::error::RejectReason;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Naive layouts accepted after RFC 3339; they are read as UTC.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Battery identifier as delivered by the backend.
///
/// Integer ids sort numerically and ahead of text ids, text ids sort
/// lexicographically. A text id is never coerced into a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum DeviceId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceId::Numeric(id) => write!(f, "{}", id),
            DeviceId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for DeviceId {
    fn from(id: i64) -> Self {
        DeviceId::Numeric(id)
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        DeviceId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    device_id: DeviceId,
    voltage: f64,
    timestamp: DateTime<Utc>,
}

impl Reading {
    pub fn new(
        device_id: DeviceId,
        voltage: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, RejectReason> {
        if let DeviceId::Text(id) = &device_id {
            if id.trim().is_empty() {
                return Err(RejectReason::EmptyDeviceId);
            }
        }
        if !voltage.is_finite() {
            return Err(RejectReason::NonFiniteVoltage);
        }

        Ok(Self {
            device_id,
            voltage,
            timestamp,
        })
    }

    /// Build a reading from one backend item: `{battery_id, voltage, timestamp}`.
    pub fn from_record(record: &Value) -> Result<Self, RejectReason> {
        let fields = record.as_object().ok_or(RejectReason::NotAnObject)?;

        let device_id = match fields.get("battery_id") {
            None | Some(Value::Null) => return Err(RejectReason::MissingDeviceId),
            Some(Value::String(id)) => DeviceId::Text(id.clone()),
            Some(Value::Number(id)) => id
                .as_i64()
                .map(DeviceId::Numeric)
                .ok_or(RejectReason::InvalidDeviceId)?,
            Some(_) => return Err(RejectReason::InvalidDeviceId),
        };

        let voltage = match fields.get("voltage") {
            None | Some(Value::Null) => return Err(RejectReason::MissingVoltage),
            Some(Value::Number(v)) => v.as_f64().ok_or(RejectReason::NonNumericVoltage)?,
            Some(_) => return Err(RejectReason::NonNumericVoltage),
        };

        let timestamp = match fields.get("timestamp") {
            None | Some(Value::Null) => return Err(RejectReason::MissingTimestamp),
            Some(Value::String(raw)) => {
                parse_timestamp(raw).ok_or_else(|| RejectReason::UnparsableTimestamp {
                    value: raw.clone(),
                })?
            }
            Some(_) => return Err(RejectReason::InvalidTimestampType),
        };

        Self::new(device_id, voltage, timestamp)
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Parse an ISO-8601-like instant into UTC.
///
/// RFC 3339 strings keep their offset and are normalised; offset-less
/// strings are taken to already be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_from_record() {
        let reading = Reading::from_record(&json!({
            "battery_id": "bat-1",
            "voltage": 3.7,
            "timestamp": "2024-05-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(reading.device_id(), &DeviceId::from("bat-1"));
        assert_eq!(reading.voltage(), 3.7);
        assert_eq!(
            reading.timestamp(),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_integer_device_id() {
        let reading = Reading::from_record(&json!({
            "battery_id": 42,
            "voltage": 12,
            "timestamp": "2024-05-01T12:00:00"
        }))
        .unwrap();

        assert_eq!(reading.device_id(), &DeviceId::Numeric(42));
        assert_eq!(reading.voltage(), 12.0);
    }

    #[test]
    fn test_rejections() {
        let cases = [
            (json!("not a record"), RejectReason::NotAnObject),
            (
                json!({"voltage": 3.7, "timestamp": "2024-05-01T12:00:00Z"}),
                RejectReason::MissingDeviceId,
            ),
            (
                json!({"battery_id": "  ", "voltage": 3.7, "timestamp": "2024-05-01T12:00:00Z"}),
                RejectReason::EmptyDeviceId,
            ),
            (
                json!({"battery_id": 1.5, "voltage": 3.7, "timestamp": "2024-05-01T12:00:00Z"}),
                RejectReason::InvalidDeviceId,
            ),
            (
                json!({"battery_id": "a", "timestamp": "2024-05-01T12:00:00Z"}),
                RejectReason::MissingVoltage,
            ),
            (
                json!({"battery_id": "a", "voltage": "3.7", "timestamp": "2024-05-01T12:00:00Z"}),
                RejectReason::NonNumericVoltage,
            ),
            (
                json!({"battery_id": "a", "voltage": 3.7}),
                RejectReason::MissingTimestamp,
            ),
            (
                json!({"battery_id": "a", "voltage": 3.7, "timestamp": 1714564800}),
                RejectReason::InvalidTimestampType,
            ),
            (
                json!({"battery_id": "a", "voltage": 3.7, "timestamp": "noon"}),
                RejectReason::UnparsableTimestamp {
                    value: "noon".to_string(),
                },
            ),
        ];

        for (record, expected) in cases {
            assert_eq!(Reading::from_record(&record), Err(expected), "{}", record);
        }
    }

    #[test]
    fn test_non_finite_voltage() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(
            Reading::new(DeviceId::from("a"), f64::NAN, ts),
            Err(RejectReason::NonFiniteVoltage)
        );
        assert_eq!(
            Reading::new(DeviceId::from("a"), f64::NEG_INFINITY, ts),
            Err(RejectReason::NonFiniteVoltage)
        );
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-05-01T12:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T14:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01 12:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-05-01T12:00:00.250"),
            Some(expected + chrono::TimeDelta::milliseconds(250))
        );
        assert_eq!(parse_timestamp("01/05/2024"), None);
    }

    #[test]
    fn test_device_id_ordering() {
        let mut ids = vec![
            DeviceId::from("b"),
            DeviceId::Numeric(10),
            DeviceId::from("a"),
            DeviceId::Numeric(2),
        ];
        ids.sort();

        assert_eq!(
            ids,
            vec![
                DeviceId::Numeric(2),
                DeviceId::Numeric(10),
                DeviceId::from("a"),
                DeviceId::from("b"),
            ]
        );
    }
}
