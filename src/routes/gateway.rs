//! Gateway routes: SQL passthrough, reverse proxy, and the API/static-file fallback.

use crate::handlers::{fallback, forward, query_method_not_allowed, run_query};
use crate::state::AppState;
use axum::{
    routing::{any, post},
    Router,
};

pub fn gateway_routes(state: AppState) -> Router {
    Router::new()
        .route("/query", post(run_query).fallback(query_method_not_allowed))
        .route("/proxy", any(forward))
        .route("/proxy/", any(forward))
        .route("/proxy/*target", any(forward))
        .fallback(fallback)
        .with_state(state)
}
