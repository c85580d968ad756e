use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::geocode::GeocodeResult;
use crate::upstream::{PositionSample, PositionsResponse, SatelliteInfo};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellite::positions,
        super::api::geocode::reverse_geocode,
        super::api::health::health,
    ),
    components(
        schemas(
            PositionsResponse,
            PositionSample,
            SatelliteInfo,
            GeocodeResult,
            ErrorResponse,
        )
    ),
    info(
        title = "Sat-O-Track API",
        description = "Caching proxy for satellite positions and reverse geocoding",
        version = "0.1.0"
    ),
    tags(
        (name = "satellite", description = "Satellite position lookup"),
        (name = "geocode", description = "Reverse geocoding"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
