// Backend repository implementation - Battery readings over HTTP
use crate::application::readings_repository::{ReadingsQuery, ReadingsRepository};
use crate::infrastructure::config::BackendSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpReadingsRepository {
    client: reqwest::Client,
    base_url: String,
    readings_path: String,
    token: Option<String>,
}

/// Items stay untyped so one bad item does not fail the whole page.
#[derive(Debug, Deserialize)]
struct ReadingsPage {
    #[serde(default)]
    items: Vec<Value>,
}

impl HttpReadingsRepository {
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            readings_path: format!("/{}", settings.readings_path.trim_start_matches('/')),
            token: settings.token.clone(),
        })
    }

    fn build_query_url(&self, query: &ReadingsQuery) -> String {
        let params: Vec<String> = query
            .params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
            .collect();

        if params.is_empty() {
            format!("{}{}", self.base_url, self.readings_path)
        } else {
            format!("{}{}?{}", self.base_url, self.readings_path, params.join("&"))
        }
    }
}

#[async_trait]
impl ReadingsRepository for HttpReadingsRepository {
    async fn fetch_readings(&self, query: &ReadingsQuery) -> Result<Vec<Value>> {
        let url = self.build_query_url(query);
        tracing::debug!("Fetching readings: {}", url);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to readings backend")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Readings backend returned {}: {}", status, body);
        }

        let page = response
            .json::<ReadingsPage>()
            .await
            .context("Failed to parse readings backend response")?;

        tracing::debug!("Fetched {} raw readings", page.items.len());
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repository(base_url: &str, readings_path: &str) -> HttpReadingsRepository {
        HttpReadingsRepository::new(&BackendSettings {
            base_url: base_url.to_string(),
            readings_path: readings_path.to_string(),
            timeout_secs: 5,
            token: None,
        })
        .unwrap()
    }

    #[test]
    fn test_build_query_url() {
        let repo = repository("http://backend/api/", "readings");
        let query = ReadingsQuery {
            start_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap()),
            end_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        };

        assert_eq!(
            repo.build_query_url(&query),
            concat!(
                "http://backend/api/readings",
                "?start_time=2024-05-01T11%3A00%3A00.000Z",
                "&end_time=2024-05-01T12%3A00%3A00.000Z"
            )
        );
    }

    #[test]
    fn test_build_query_url_without_bounds() {
        let repo = repository("http://backend", "/readings");
        assert_eq!(
            repo.build_query_url(&ReadingsQuery::default()),
            "http://backend/readings"
        );
    }

    #[test]
    fn test_page_tolerates_bad_items() {
        let page: ReadingsPage = serde_json::from_value(serde_json::json!({
            "items": [
                {"battery_id": "a", "voltage": 3.7, "timestamp": "2024-05-01T11:00:00Z"},
                42,
                "junk"
            ]
        }))
        .unwrap();
        assert_eq!(page.items.len(), 3);

        let empty: ReadingsPage = serde_json::from_str("{}").unwrap();
        assert!(empty.items.is_empty());
    }
}
