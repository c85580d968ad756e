use axum::{
    extract::{Path, State},
    Json,
};

use crate::geocode::{resolve_location, GeocodeResult};
use crate::upstream::Service;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::config::OPENCAGE_API_KEY;
use crate::web::state::AppState;

const FETCH_FAILED: &str = "Failed to fetch location";

#[utoipa::path(
    get,
    path = "/api/reverse-geocode/{lat}/{lng}",
    params(
        ("lat" = String, Path, description = "Latitude (degrees)"),
        ("lng" = String, Path, description = "Longitude (degrees)")
    ),
    responses(
        (status = 200, description = "Best place name, or Unknown/Ocean", body = GeocodeResult),
        (status = 500, description = "Missing credential or upstream failure", body = ErrorResponse)
    ),
    tag = "geocode"
)]
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Path((lat, lng)): Path<(String, String)>,
) -> ApiResult<Json<GeocodeResult>> {
    let api_key = state
        .config
        .opencage_api_key()
        .ok_or(ApiError::MissingCredential(OPENCAGE_API_KEY))?;

    let results = state
        .opencage
        .reverse(api_key, &lat, &lng)
        .await
        .map_err(|source| ApiError::Upstream {
            service: Service::OpenCage,
            message: FETCH_FAILED,
            source,
        })?;

    Ok(Json(resolve_location(results)))
}
