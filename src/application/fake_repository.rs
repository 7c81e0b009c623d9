// In-memory repository for service and handler tests
use crate::application::readings_repository::{ReadingsQuery, ReadingsRepository};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeRepository {
    records: Vec<Value>,
    fail: bool,
    queries: Mutex<Vec<ReadingsQuery>>,
}

impl FakeRepository {
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<ReadingsQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReadingsRepository for FakeRepository {
    async fn fetch_readings(&self, query: &ReadingsQuery) -> anyhow::Result<Vec<Value>> {
        self.queries.lock().unwrap().push(*query);
        if self.fail {
            anyhow::bail!("backend unavailable");
        }
        Ok(self.records.clone())
    }
}

/// Two batteries with fresh readings plus one malformed record.
pub fn recent_records() -> Vec<Value> {
    let now = chrono::Utc::now();
    let ago = |minutes: i64| (now - chrono::TimeDelta::minutes(minutes)).to_rfc3339();
    vec![
        json!({"battery_id": "bat-1", "voltage": 3.7, "timestamp": ago(30)}),
        json!({"battery_id": "bat-1", "voltage": 3.6, "timestamp": ago(10)}),
        json!({"battery_id": "bat-2", "voltage": 12.4, "timestamp": ago(20)}),
        json!({"battery_id": "bat-2", "voltage": null, "timestamp": ago(5)}),
    ]
}
