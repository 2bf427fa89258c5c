//! Requests routed through the API description: template match, parameter collection, SQL.

use crate::config::ResolvedEndpoint;
use crate::error::AppError;
use crate::extractors::body_params;
use crate::response::json_response;
use crate::service::QueryService;
use crate::sql::bind_named;
use crate::state::AppState;
use axum::{
    extract::{Query, Request},
    response::Response,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// First value of each query parameter.
fn first_query_values(req: &Request) -> HashMap<String, String> {
    let pairs = match Query::<Vec<(String, String)>>::try_from_uri(req.uri()) {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            tracing::warn!("Failed to parse query string: {}", e);
            Vec::new()
        }
    };
    let mut out = HashMap::new();
    for (k, v) in pairs {
        out.entry(k).or_insert(v);
    }
    out
}

/// Path, then query, then body; a name found nowhere binds NULL.
fn lookup(
    name: &str,
    path: &HashMap<String, String>,
    query: &HashMap<String, String>,
    body: &Map<String, Value>,
) -> Value {
    if let Some(v) = path.get(name) {
        return Value::String(v.clone());
    }
    if let Some(v) = query.get(name) {
        return Value::String(v.clone());
    }
    body.get(name).cloned().unwrap_or(Value::Null)
}

/// Run the SQL declared for this endpoint and method.
pub async fn dispatch(
    state: &AppState,
    endpoint: &ResolvedEndpoint,
    path_params: HashMap<String, String>,
    req: Request,
) -> Result<Response, AppError> {
    let method = req.method().clone();
    tracing::info!("Found endpoint {} for {} {}", endpoint.path, method, req.uri().path());
    let def = endpoint.method(method.as_str()).ok_or_else(|| {
        AppError::MethodNotAllowed(format!("method {} not allowed for {}", method, endpoint.path))
    })?;

    let query = first_query_values(&req);
    let body = body_params(req.into_body(), state.settings.max_body_bytes).await;
    let q = bind_named(&def.sql, &def.params, |name| lookup(name, &path_params, &query, &body));

    let rows = QueryService::execute(&state.pool, &q.sql, &q.params).await?;
    Ok(json_response(rows, state.show_responses()))
}
