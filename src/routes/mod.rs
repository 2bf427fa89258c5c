//! Router assembly and cross-cutting layers.

mod common;
mod gateway;
pub use common::common_routes;
pub use gateway::gateway_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Every origin, method and header is allowed; preflights are answered by the layer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Full application: `/_gateway/*` status routes, gateway routes, CORS, body limit, tracing.
pub fn app(state: AppState) -> Router {
    let limit = state.settings.max_body_bytes;
    Router::new()
        .nest("/_gateway", common_routes(state.clone()))
        .merge(gateway_routes(state))
        .layer(DefaultBodyLimit::max(limit))
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
