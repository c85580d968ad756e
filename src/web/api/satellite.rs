use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::upstream::{PositionQuery, PositionsResponse, Service};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::config::N2YO_API_KEY;
use crate::web::state::AppState;

const FETCH_FAILED: &str = "Failed to fetch satellite data";

#[utoipa::path(
    get,
    path = "/api/satellite/{id}/{lat}/{lng}/{alt}/{seconds}",
    params(
        ("id" = String, Path, description = "NORAD catalogue id"),
        ("lat" = String, Path, description = "Observer latitude (degrees)"),
        ("lng" = String, Path, description = "Observer longitude (degrees)"),
        ("alt" = String, Path, description = "Observer altitude above sea level (metres)"),
        ("seconds" = String, Path, description = "Number of future positions to return")
    ),
    responses(
        (status = 200, description = "Upstream position payload", body = PositionsResponse),
        (status = 500, description = "Missing credential or upstream failure", body = ErrorResponse)
    ),
    tag = "satellite"
)]
pub async fn positions(
    State(state): State<AppState>,
    Path(query): Path<PositionQuery>,
) -> ApiResult<Response> {
    let api_key = state
        .config
        .n2yo_api_key()
        .ok_or(ApiError::MissingCredential(N2YO_API_KEY))?;

    let key = query.cache_key();
    let body = state
        .cache
        .get_or_fetch(&key, || state.n2yo.positions(api_key, &query))
        .await
        .map_err(|source| ApiError::Upstream {
            service: Service::N2yo,
            message: FETCH_FAILED,
            source,
        })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
