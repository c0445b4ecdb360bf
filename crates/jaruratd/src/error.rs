//! HTTP error mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jarurat_shared::{CareError, ErrorBody};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Care(#[from] CareError),

    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Care(CareError::Validation(fields)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::to_value(fields).unwrap_or_default(),
            ),
            ApiError::Care(e) => {
                error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::Value::String(e.to_string()),
                )
            }
            ApiError::Body(rejection) => (
                rejection.status(),
                serde_json::Value::String(rejection.body_text()),
            ),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, serde_json::Value::String(what)),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
