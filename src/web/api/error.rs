use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::upstream::{Service, UpstreamError};

pub enum ApiError {
    /// A required credential is not configured.
    MissingCredential(&'static str),
    /// The third-party call failed. Only `message` reaches the client.
    Upstream {
        service: Service,
        message: &'static str,
        source: UpstreamError,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingCredential(var) => {
                log::error!("{} is not configured", var);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(&format!("{} not set", var))),
                )
                    .into_response()
            }
            ApiError::Upstream {
                service,
                message,
                source,
            } => {
                log::error!("{} request failed: {}", service, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(message)),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
        }
    }
}
