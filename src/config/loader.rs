//! Load the API description from a JSON file and resolve it.

use crate::config::{resolve, ApiDescription, ResolvedApi};
use crate::error::ConfigError;
use std::path::Path;

pub async fn load_api_description(path: &Path) -> Result<ApiDescription, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read, validate and compile. Returns Ok(None) when the file does not exist.
pub async fn load_api(path: &Path) -> Result<Option<ResolvedApi>, ConfigError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::warn!("API description file not found: {}", path.display());
        return Ok(None);
    }
    let desc = load_api_description(path).await?;
    let api = resolve(&desc)?;
    tracing::info!(
        "API description loaded: {} (v{}), {} endpoints under '{}'",
        api.name,
        api.api_version,
        api.endpoints.len(),
        if api.base_path.is_empty() { "/" } else { api.base_path.as_str() }
    );
    Ok(Some(api))
}
