use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::error::WatchError;
use crate::upstream::{PositionSample, PositionsResponse};

/// Object and observer the watcher asks the backend about.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub norad_id: u32,
    pub observer_lat: f64,
    pub observer_lng: f64,
    pub observer_alt: f64,
    pub seconds: u32,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            norad_id: 25544,
            observer_lat: 41.702,
            observer_lng: -76.014,
            observer_alt: 0.0,
            seconds: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LocationResponse {
    location: String,
}

#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WatchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn positions(&self, target: &Target) -> Result<Vec<PositionSample>, WatchError> {
        let url = format!(
            "{}/api/satellite/{}/{}/{}/{}/{}",
            self.base_url,
            target.norad_id,
            target.observer_lat,
            target.observer_lng,
            target.observer_alt,
            target.seconds
        );
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(WatchError::Status(response.status()));
        }
        let body: PositionsResponse = response.json().await?;
        Ok(body.positions)
    }

    pub async fn location(&self, lat: f64, lng: f64) -> Result<String, WatchError> {
        let url = format!("{}/api/reverse-geocode/{}/{}", self.base_url, lat, lng);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(WatchError::Status(response.status()));
        }
        let body: LocationResponse = response.json().await?;
        Ok(body.location)
    }
}
