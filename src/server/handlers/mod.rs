pub mod apps;
pub mod features;
pub mod health;
pub mod repositories;
pub mod samples;
pub mod tags;

use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};

use crate::errors::SampleError;

pub type ApiError = (StatusCode, Json<Value>);

/// Map a service error onto an HTTP status and JSON body. Server-side
/// failures are logged here, client errors are returned as-is.
pub fn error_response(err: SampleError) -> ApiError {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("Request failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
}
