//! POST /query: run one client-supplied statement.

use crate::error::AppError;
use crate::extractors::AnyJson;
use crate::response::json_response;
use crate::service::QueryService;
use crate::state::AppState;
use axum::{extract::State, response::Response};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub sql: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub params: Vec<Value>,
}

/// `"params": null` means no parameters.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

pub async fn run_query(
    State(state): State<AppState>,
    AnyJson(req): AnyJson<QueryRequest>,
) -> Result<Response, AppError> {
    let rows = QueryService::execute(&state.pool, &req.sql, &req.params).await?;
    Ok(json_response(rows, state.show_responses()))
}

pub async fn query_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("only POST method is allowed".into())
}
