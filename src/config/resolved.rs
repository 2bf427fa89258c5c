//! Resolved API model: description validated and compiled for request matching.

use crate::config::{validate, ApiDescription, EndpointDefinition, MethodDefinition};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn template_param_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r":([^/]+)").expect("static pattern"))
}

/// `/clients/:id` -> `^/clients/([^/]+)$`
pub fn template_to_regex(template: &str) -> String {
    let escaped = regex::escape(template);
    let pattern = template_param_re().replace_all(&escaped, "([^/]+)");
    format!("^{}$", pattern)
}

/// Parameter names of a path template, in capture order.
pub fn template_param_names(template: &str) -> Vec<String> {
    template_param_re()
        .captures_iter(template)
        .map(|c| c[1].to_string())
        .collect()
}

#[derive(Clone, Debug)]
pub struct ResolvedEndpoint {
    pub path: String,
    pattern: Regex,
    param_names: Vec<String>,
    /// Keyed by upper-case method name.
    pub methods: HashMap<String, MethodDefinition>,
}

impl ResolvedEndpoint {
    pub fn compile(def: &EndpointDefinition) -> Result<Self, ConfigError> {
        let pattern = Regex::new(&template_to_regex(&def.path)).map_err(|source| {
            ConfigError::InvalidTemplate {
                template: def.path.clone(),
                source,
            }
        })?;
        Ok(ResolvedEndpoint {
            path: def.path.clone(),
            pattern,
            param_names: template_param_names(&def.path),
            methods: def
                .methods
                .iter()
                .map(|(m, d)| (m.to_uppercase(), d.clone()))
                .collect(),
        })
    }

    /// Path parameters when `path` matches this template.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.pattern.captures(path)?;
        Some(
            self.param_names
                .iter()
                .enumerate()
                .filter_map(|(i, name)| caps.get(i + 1).map(|m| (name.clone(), m.as_str().to_string())))
                .collect(),
        )
    }

    pub fn method(&self, method: &str) -> Option<&MethodDefinition> {
        self.methods.get(&method.to_uppercase())
    }
}

/// Outcome of looking a request path up in the API.
#[derive(Debug)]
pub enum EndpointMatch<'a> {
    Matched {
        endpoint: &'a ResolvedEndpoint,
        path_params: HashMap<String, String>,
    },
    /// Under the base path but no template matched.
    Unmatched,
    /// Not under the base path at all.
    Outside,
}

#[derive(Clone, Debug)]
pub struct ResolvedApi {
    pub name: String,
    pub api_version: String,
    pub description: String,
    /// Without trailing slash; empty when the API owns every path.
    pub base_path: String,
    pub endpoints: Vec<ResolvedEndpoint>,
}

impl ResolvedApi {
    /// Request path relative to the base path, or None when outside it.
    pub fn strip_base<'p>(&self, path: &'p str) -> Option<&'p str> {
        if self.base_path.is_empty() {
            return Some(path);
        }
        let rest = path.strip_prefix(self.base_path.as_str())?;
        if rest.is_empty() {
            Some("/")
        } else if rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    /// Match against the path with one trailing slash trimmed first, then as given.
    pub fn find_endpoint(&self, request_path: &str) -> EndpointMatch<'_> {
        let Some(relative) = self.strip_base(request_path) else {
            return EndpointMatch::Outside;
        };
        let normalized = match relative.strip_suffix('/') {
            Some("") | None => relative,
            Some(trimmed) => trimmed,
        };
        tracing::debug!("matching {} (normalized: {})", relative, normalized);

        let mut candidates = vec![normalized];
        if normalized != relative {
            candidates.push(relative);
        }
        for candidate in candidates {
            for endpoint in &self.endpoints {
                if let Some(path_params) = endpoint.captures(candidate) {
                    return EndpointMatch::Matched {
                        endpoint,
                        path_params,
                    };
                }
            }
        }
        EndpointMatch::Unmatched
    }
}

/// Build the resolved API from a description (validates first).
pub fn resolve(desc: &ApiDescription) -> Result<ResolvedApi, ConfigError> {
    validate(desc)?;
    let endpoints = desc
        .endpoints
        .iter()
        .map(ResolvedEndpoint::compile)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ResolvedApi {
        name: desc.name.clone(),
        api_version: desc.api_version.clone(),
        description: desc.description.clone(),
        base_path: desc.base_path.trim_end_matches('/').to_string(),
        endpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str, paths: &[&str]) -> ResolvedApi {
        let endpoints = paths
            .iter()
            .map(|p| {
                serde_json::json!({"path": p, "methods": {"get": {"sql": "SELECT 1"}}})
            })
            .collect::<Vec<_>>();
        let desc: ApiDescription = serde_json::from_value(serde_json::json!({
            "basePath": base,
            "endpoints": endpoints,
        }))
        .expect("description");
        resolve(&desc).expect("resolve")
    }

    #[test]
    fn template_becomes_anchored_pattern() {
        assert_eq!(template_to_regex("/clients/:id"), "^/clients/([^/]+)$");
        assert_eq!(template_to_regex("/a.b/:x/c"), r"^/a\.b/([^/]+)/c$");
        assert_eq!(template_param_names("/o/:org/r/:repo"), vec!["org", "repo"]);
    }

    #[test]
    fn extracts_path_params() {
        let api = api("/api", &["/clients", "/clients/:id", "/o/:org/r/:repo"]);
        match api.find_endpoint("/api/o/acme/r/widgets") {
            EndpointMatch::Matched { endpoint, path_params } => {
                assert_eq!(endpoint.path, "/o/:org/r/:repo");
                assert_eq!(path_params["org"], "acme");
                assert_eq!(path_params["repo"], "widgets");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn trailing_slash_and_base_path() {
        let api = api("/api/", &["/", "/clients"]);
        assert_eq!(api.base_path, "/api");
        assert!(matches!(
            api.find_endpoint("/api/clients/"),
            EndpointMatch::Matched { endpoint, .. } if endpoint.path == "/clients"
        ));
        assert!(matches!(
            api.find_endpoint("/api"),
            EndpointMatch::Matched { endpoint, .. } if endpoint.path == "/"
        ));
        assert!(matches!(api.find_endpoint("/api/nope"), EndpointMatch::Unmatched));
        assert!(matches!(api.find_endpoint("/apiary"), EndpointMatch::Outside));
        assert!(matches!(api.find_endpoint("/index.html"), EndpointMatch::Outside));
    }

    #[test]
    fn empty_base_path_owns_everything() {
        let api = api("", &["/items/:id"]);
        assert!(matches!(api.find_endpoint("/items/3"), EndpointMatch::Matched { .. }));
        assert!(matches!(api.find_endpoint("/style.css"), EndpointMatch::Unmatched));
    }

    #[test]
    fn declaration_order_wins() {
        let api = api("", &["/items/:id", "/items/new"]);
        match api.find_endpoint("/items/new") {
            EndpointMatch::Matched { endpoint, path_params } => {
                assert_eq!(endpoint.path, "/items/:id");
                assert_eq!(path_params["id"], "new");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn methods_are_case_insensitive() {
        let api = api("", &["/x"]);
        assert!(api.endpoints[0].method("GET").is_some());
        assert!(api.endpoints[0].method("get").is_some());
        assert!(api.endpoints[0].method("POST").is_none());
    }
}
