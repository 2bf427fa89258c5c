//! Fallback: API paths first, then static files from the root directory.

use crate::config::EndpointMatch;
use crate::error::AppError;
use crate::handlers::api;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;

pub async fn fallback(State(state): State<AppState>, req: Request) -> Response {
    if let Some(resolved) = state.api.clone() {
        match resolved.find_endpoint(req.uri().path()) {
            EndpointMatch::Matched { endpoint, path_params } => {
                return api::dispatch(&state, endpoint, path_params, req)
                    .await
                    .into_response();
            }
            EndpointMatch::Unmatched if !resolved.base_path.is_empty() => {
                tracing::info!("No endpoint found for {} {}", req.method(), req.uri().path());
                return AppError::NotFound(req.uri().path().to_string()).into_response();
            }
            _ => {}
        }
    }
    serve_file(&state, req).await
}

/// `/` serves index.html; missing files are 404; paths cannot escape the root.
pub async fn serve_file(state: &AppState, req: Request) -> Response {
    tracing::debug!("Trying to serve: {}", req.uri().path());
    match state.files.clone().oneshot(req).await {
        Ok(res) => res.map(Body::new).into_response(),
        Err(never) => match never {},
    }
}
