mod error;
mod n2yo;
mod opencage;
mod types;

pub use error::UpstreamError;
pub use n2yo::N2yoClient;
pub use opencage::OpenCageClient;
pub use types::{PositionQuery, PositionSample, PositionsResponse, SatelliteInfo, Service};

use std::time::Duration;

/// Shared HTTP client for both third-party services.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("sat-o-track/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(UpstreamError::Request)
}
