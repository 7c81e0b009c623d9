// Window query parameters accepted by the dashboard endpoint
use crate::domain::error::PipelineError;
use crate::domain::reading::parse_timestamp;
use crate::domain::time_window::{TimeUnit, WindowPreset, WindowSpec};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// `range` picks a preset. Otherwise `kind` selects the spec; with no
/// `kind`, any `start_time` / `end_time` form an absolute window.
#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub range: Option<String>,
    pub kind: Option<String>,
    pub amount: Option<i64>,
    pub unit: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl WindowQuery {
    /// Read a posted window object: `{kind, amount, unit, start, end}` or
    /// `{range}`. Wrong-typed fields are window errors, not decode errors.
    pub fn from_json(window: &Value) -> Result<Self, PipelineError> {
        let fields = window
            .as_object()
            .ok_or_else(|| PipelineError::invalid_window("window must be a JSON object"))?;

        let amount = match fields.get("amount") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_i64().ok_or_else(|| {
                PipelineError::invalid_window(format!("amount {} is not an integer", value))
            })?),
        };

        Ok(Self {
            range: text_field(fields, "range")?,
            kind: text_field(fields, "kind")?,
            amount,
            unit: text_field(fields, "unit")?,
            start_time: text_field(fields, "start")?,
            end_time: text_field(fields, "end")?,
        })
    }

    pub fn to_spec(&self, default: WindowPreset) -> Result<WindowSpec, PipelineError> {
        if let Some(range) = &self.range {
            return Ok(range.parse::<WindowPreset>()?.spec());
        }

        match self.kind.as_deref() {
            None if self.start_time.is_none() && self.end_time.is_none() => Ok(default.spec()),
            None | Some("absolute") => Ok(WindowSpec::Absolute {
                start: parse_bound("start_time", self.start_time.as_deref())?,
                end: parse_bound("end_time", self.end_time.as_deref())?,
            }),
            Some("relative") => {
                let amount = self.amount.ok_or_else(|| {
                    PipelineError::invalid_window("relative window needs an amount")
                })?;
                let unit = self
                    .unit
                    .as_deref()
                    .ok_or_else(|| PipelineError::invalid_window("relative window needs a unit"))?
                    .parse::<TimeUnit>()?;
                Ok(WindowSpec::relative(amount, unit))
            }
            Some("all") => Ok(WindowSpec::All),
            Some(other) => Err(PipelineError::invalid_window(format!(
                "unknown window kind {:?}",
                other
            ))),
        }
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> Result<Option<String>, PipelineError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(PipelineError::invalid_window(format!(
            "{} must be a string, got {}",
            name, other
        ))),
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, PipelineError> {
    raw.map(|value| {
        parse_timestamp(value).ok_or_else(|| {
            PipelineError::invalid_window(format!("{} {:?} is not a valid timestamp", name, value))
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_default_range() {
        let spec = WindowQuery::default().to_spec(WindowPreset::LastDay).unwrap();
        assert_eq!(spec, WindowSpec::relative(1, TimeUnit::Day));
    }

    #[test]
    fn test_range_preset() {
        let query = WindowQuery {
            range: Some("all".to_string()),
            ..WindowQuery::default()
        };
        assert_eq!(query.to_spec(WindowPreset::LastHour).unwrap(), WindowSpec::All);

        let query = WindowQuery {
            range: Some("fortnight".to_string()),
            ..WindowQuery::default()
        };
        assert!(query.to_spec(WindowPreset::LastHour).is_err());
    }

    #[test]
    fn test_relative() {
        let query = WindowQuery {
            kind: Some("relative".to_string()),
            amount: Some(12),
            unit: Some("hour".to_string()),
            ..WindowQuery::default()
        };
        assert_eq!(
            query.to_spec(WindowPreset::LastHour).unwrap(),
            WindowSpec::relative(12, TimeUnit::Hour)
        );

        let missing_unit = WindowQuery {
            kind: Some("relative".to_string()),
            amount: Some(12),
            ..WindowQuery::default()
        };
        assert!(missing_unit.to_spec(WindowPreset::LastHour).is_err());
    }

    #[test]
    fn test_bare_bounds_are_absolute() {
        let query = WindowQuery {
            start_time: Some("2024-05-01T10:00:00Z".to_string()),
            ..WindowQuery::default()
        };
        assert_eq!(
            query.to_spec(WindowPreset::LastHour).unwrap(),
            WindowSpec::Absolute {
                start: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
                end: None,
            }
        );

        let bad = WindowQuery {
            kind: Some("absolute".to_string()),
            end_time: Some("soon".to_string()),
            ..WindowQuery::default()
        };
        assert!(bad.to_spec(WindowPreset::LastHour).is_err());
    }

    #[test]
    fn test_unknown_kind() {
        let query = WindowQuery {
            kind: Some("rolling".to_string()),
            ..WindowQuery::default()
        };
        assert!(query.to_spec(WindowPreset::LastHour).is_err());
    }

    #[test]
    fn test_from_json() {
        let query = WindowQuery::from_json(&json!({
            "kind": "absolute",
            "start": "2024-05-01T10:00:00",
            "end": null
        }))
        .unwrap();
        assert_eq!(
            query.to_spec(WindowPreset::LastHour).unwrap(),
            WindowSpec::Absolute {
                start: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
                end: None,
            }
        );

        let query = WindowQuery::from_json(&json!({"kind": "relative", "amount": 2, "unit": "day"}))
            .unwrap();
        assert_eq!(
            query.to_spec(WindowPreset::LastHour).unwrap(),
            WindowSpec::relative(2, TimeUnit::Day)
        );
    }

    #[test]
    fn test_from_json_rejects_bad_fields() {
        let bad_windows = [
            json!("1h"),
            json!({"kind": "relative", "amount": 1.5, "unit": "hour"}),
            json!({"kind": 3}),
        ];
        for window in bad_windows {
            let err = WindowQuery::from_json(&window).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidWindowSpec { .. }), "{}", window);
        }

        let week = WindowQuery::from_json(&json!({"kind": "relative", "amount": 1, "unit": "week"}))
            .unwrap();
        assert!(week.to_spec(WindowPreset::LastHour).is_err());
    }
}
