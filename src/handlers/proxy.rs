//! /proxy/<host>/<path>: forward to `<scheme>://<host>/<path>` so browser apps avoid CORS.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::Response,
};
use std::net::{IpAddr, SocketAddr};

const PROXY_PREFIX: &str = "/proxy/";

const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Upstream host and path split off a proxy request path.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyTarget {
    pub host: String,
    pub path: String,
    pub url: reqwest::Url,
}

impl ProxyTarget {
    /// First segment after `/proxy/` is the host, the remainder (or `/`) the path; the raw query is kept.
    pub fn parse(request_path: &str, query: Option<&str>, scheme: &str) -> Result<Self, AppError> {
        let target = request_path.strip_prefix(PROXY_PREFIX).unwrap_or(request_path);
        let (host, path) = match target.split_once('/') {
            Some((host, rest)) => (host, format!("/{}", rest)),
            None => (target, "/".to_string()),
        };
        if host.is_empty() || host.contains(['@', '?', '#', '\\']) {
            return Err(AppError::BadRequest(format!("invalid target URL: bad host '{}'", host)));
        }
        let mut raw = format!("{}://{}{}", scheme, host, path);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            raw.push('?');
            raw.push_str(q);
        }
        let url = reqwest::Url::parse(&raw)
            .map_err(|e| AppError::BadRequest(format!("invalid target URL: {}", e)))?;
        Ok(ProxyTarget {
            host: host.to_string(),
            path,
            url,
        })
    }
}

/// Copy of `headers` without hop-by-hop headers (including those named by `Connection`).
fn end_to_end_headers(headers: &HeaderMap, skip: &[HeaderName]) -> HeaderMap {
    let listed: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|s| s.trim().to_ascii_lowercase())
        .collect();
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let n = name.as_str();
        if HOP_BY_HOP.contains(&n) || listed.iter().any(|l| l == n) || skip.contains(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

fn append_forwarded_for(headers: &mut HeaderMap, client: IpAddr) {
    let value = match headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        Some(prior) => format!("{}, {}", prior, client),
        None => client.to_string(),
    };
    if let Ok(v) = HeaderValue::from_str(&value) {
        headers.insert("x-forwarded-for", v);
    }
}

pub async fn forward(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    req: Request,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();
    let target = ProxyTarget::parse(parts.uri.path(), parts.uri.query(), &state.settings.proxy_scheme)?;
    tracing::info!("Proxying {} {} -> {}", parts.method, parts.uri.path(), target.url);

    let mut headers = end_to_end_headers(&parts.headers, &[header::HOST, header::CONTENT_LENGTH]);
    if let Some(ConnectInfo(addr)) = connect_info {
        append_forwarded_for(&mut headers, addr.ip());
    }
    let body = axum::body::to_bytes(body, state.settings.max_body_bytes)
        .await
        .map_err(|e| AppError::BadRequest(format!("failed to read request body: {}", e)))?;

    let upstream = state
        .http
        .request(parts.method, target.url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = end_to_end_headers(upstream.headers(), &[]);
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
