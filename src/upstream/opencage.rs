use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::error::UpstreamError;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// Client for the reverse geocoding service.
#[derive(Clone)]
pub struct OpenCageClient {
    http: Client,
    base_url: String,
}

impl OpenCageClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Returns the raw results, ranked by relevance.
    pub async fn reverse(
        &self,
        api_key: &str,
        lat: &str,
        lng: &str,
    ) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/geocode/v1/json", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .query(&[("q", format!("{},{}", lat, lng)), ("key", api_key.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: ReverseResponse = serde_json::from_slice(&body)?;
        Ok(parsed.results)
    }
}
