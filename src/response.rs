//! JSON row responses, optionally logged pretty-printed (`--show-responses`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Serialize `data` as the response body. When `show` is set the body is also logged.
pub fn json_response<T: Serialize>(data: T, show: bool) -> Response {
    if show {
        match serde_json::to_string_pretty(&data) {
            Ok(pretty) => tracing::info!("Sending response: {}", pretty),
            Err(e) => tracing::warn!("Error prettifying JSON for logging: {}", e),
        }
    }
    (StatusCode::OK, Json(data)).into_response()
}
