//! Raw API description types matching the JSON document passed with `--api`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescription {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub endpoints: Vec<EndpointDefinition>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EndpointDefinition {
    /// Path template, e.g. `/clients/:id`.
    pub path: String,
    /// HTTP method name -> SQL to run.
    #[serde(default)]
    pub methods: BTreeMap<String, MethodDefinition>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodDefinition {
    #[serde(default)]
    pub description: String,
    pub sql: String,
    /// Names substituted for `:name` placeholders in `sql`, looked up in path, query, then body.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}
