use axum::body::Bytes;
use reqwest::{Client, Url};
use serde::de::IgnoredAny;

use super::error::UpstreamError;
use super::types::PositionQuery;

/// Client for the satellite tracking service.
#[derive(Clone)]
pub struct N2yoClient {
    http: Client,
    base_url: String,
}

impl N2yoClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetches predicted positions and returns the body untouched.
    pub async fn positions(
        &self,
        api_key: &str,
        query: &PositionQuery,
    ) -> Result<Bytes, UpstreamError> {
        let url = self.positions_url(api_key, query)?;
        log::debug!("Fetching positions for {} from upstream", query.id);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<IgnoredAny>(&body)?;
        Ok(body)
    }

    fn positions_url(&self, api_key: &str, query: &PositionQuery) -> Result<Url, UpstreamError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "rest",
                "v1",
                "satellite",
                "positions",
                query.id.as_str(),
                query.lat.as_str(),
                query.lng.as_str(),
                query.alt.as_str(),
                query.seconds.as_str(),
                "",
            ]);
        url.query_pairs_mut().append_pair("apiKey", api_key);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> PositionQuery {
        PositionQuery {
            id: "25544".into(),
            lat: "41.702".into(),
            lng: "-76.014".into(),
            alt: "0".into(),
            seconds: "10".into(),
        }
    }

    #[test]
    fn builds_positions_url_with_trailing_slash() {
        let client = N2yoClient::new(Client::new(), "https://api.n2yo.com");
        let url = client.positions_url("KEY", &query()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.n2yo.com/rest/v1/satellite/positions/25544/41.702/-76.014/0/10/?apiKey=KEY"
        );
    }

    #[test]
    fn escapes_path_values_instead_of_splitting_them() {
        let client = N2yoClient::new(Client::new(), "http://127.0.0.1:1/");
        let mut q = query();
        q.id = "1/2?x".into();
        let url = client.positions_url("KEY", &q).unwrap();
        assert!(url.path().contains("/1%2F2%3Fx/"));
        assert_eq!(url.query(), Some("apiKey=KEY"));
    }
}
