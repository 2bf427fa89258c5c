//! API description validation: path templates, method names, SQL presence.

use crate::config::ApiDescription;
use crate::error::ConfigError;
use crate::sql::placeholder_names;
use axum::http::Method;
use std::collections::HashSet;

pub fn validate(desc: &ApiDescription) -> Result<(), ConfigError> {
    if !desc.base_path.is_empty() && !desc.base_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "basePath must start with '/': {}",
            desc.base_path
        )));
    }

    let mut paths = HashSet::new();
    for endpoint in &desc.endpoints {
        if !endpoint.path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "endpoint path must start with '/': {}",
                endpoint.path
            )));
        }
        if !paths.insert(endpoint.path.as_str()) {
            return Err(ConfigError::DuplicatePath(endpoint.path.clone()));
        }
        for (method, def) in &endpoint.methods {
            if Method::from_bytes(method.to_uppercase().as_bytes()).is_err() {
                return Err(ConfigError::Validation(format!(
                    "{}: invalid HTTP method '{}'",
                    endpoint.path, method
                )));
            }
            if def.sql.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} {}: sql is empty",
                    method, endpoint.path
                )));
            }
            for name in placeholder_names(&def.sql) {
                if !def.params.iter().any(|p| p == name) {
                    tracing::warn!(
                        "{} {}: placeholder :{} is not listed in params and will bind NULL",
                        method,
                        endpoint.path,
                        name
                    );
                }
            }
        }
    }

    Ok(())
}
