// Repository trait for fetching raw readings from the backend
use crate::domain::time_window::TimeWindow;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Optional bounds forwarded to the backend as `start_time` / `end_time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadingsQuery {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl ReadingsQuery {
    /// ISO-8601 query parameters, omitting unset bounds.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        [("start_time", self.start_time), ("end_time", self.end_time)]
            .into_iter()
            .filter_map(|(key, ts)| {
                ts.map(|ts| (key, ts.to_rfc3339_opts(SecondsFormat::Millis, true)))
            })
            .collect()
    }
}

impl From<&TimeWindow> for ReadingsQuery {
    fn from(window: &TimeWindow) -> Self {
        Self {
            start_time: window.start(),
            end_time: window.end(),
        }
    }
}

#[async_trait]
pub trait ReadingsRepository: Send + Sync {
    /// Fetch the backend's `items` untouched; validation happens in the pipeline.
    async fn fetch_readings(&self, query: &ReadingsQuery) -> anyhow::Result<Vec<Value>>;
}
