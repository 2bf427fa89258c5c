//! Request body extraction that does not depend on `Content-Type`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// JSON body decoded regardless of the declared content type (browser `fetch` often sends text/plain).
#[derive(Debug)]
pub struct AnyJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AnyJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(e.body_text())
            } else {
                AppError::BadRequest(e.body_text())
            }
        })?;
        tracing::debug!("Request Body: {}", String::from_utf8_lossy(&bytes));
        serde_json::from_slice(&bytes)
            .map(AnyJson)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Top-level fields of a JSON object body. Empty, unreadable or non-object bodies give an empty map.
pub async fn body_params(body: Body, limit: usize) -> Map<String, Value> {
    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("Failed to read request body: {}", e);
            return Map::new();
        }
    };
    if bytes.is_empty() {
        return Map::new();
    }
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            tracing::warn!("Request body is not a JSON object; ignoring it");
            Map::new()
        }
        Err(e) => {
            tracing::warn!("Failed to parse request body as JSON: {}", e);
            Map::new()
        }
    }
}
