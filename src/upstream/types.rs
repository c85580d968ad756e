use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Service {
    N2yo,
    OpenCage,
}

/// Path parameters of a position lookup, kept as received.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PositionQuery {
    pub id: String,
    pub lat: String,
    pub lng: String,
    pub alt: String,
    pub seconds: String,
}

impl PositionQuery {
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.id, self.lat, self.lng, self.alt, self.seconds
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SatelliteInfo {
    pub satname: String,
    pub satid: u32,
    #[serde(default)]
    pub transactionscount: u32,
}

/// One predicted position, oldest first in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PositionSample {
    pub satlatitude: f64,
    pub satlongitude: f64,
    /// Kilometres.
    pub sataltitude: f64,
    #[serde(default)]
    pub azimuth: f64,
    #[serde(default)]
    pub elevation: f64,
    #[serde(default)]
    pub ra: f64,
    #[serde(default)]
    pub dec: f64,
    /// Epoch seconds.
    pub timestamp: i64,
    #[serde(default)]
    pub eclipsed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PositionsResponse {
    pub info: Option<SatelliteInfo>,
    #[serde(default)]
    pub positions: Vec<PositionSample>,
}

impl PositionsResponse {
    pub fn latest(&self) -> Option<&PositionSample> {
        self.positions.last()
    }
}
