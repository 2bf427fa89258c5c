#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlite_gateway::{app, open_database, resolve, ApiDescription, AppState, Settings};
use std::path::Path;
use tower::ServiceExt;

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Gateway over an in-memory database; `api` is the JSON text of an API description.
pub async fn gateway(root: &Path, api: Option<&str>) -> Router {
    let settings = Settings {
        db: ":memory:".into(),
        root: root.to_path_buf(),
        no_browser: true,
        proxy_scheme: "http".into(),
        ..Settings::default()
    };
    let pool = open_database(&settings.db, None).await.expect("database");
    let api = api.map(|text| {
        let desc: ApiDescription = serde_json::from_str(text).expect("api description");
        resolve(&desc).expect("resolve api")
    });
    app(AppState::new(pool, api, settings).expect("state"))
}

pub async fn send(app: &Router, req: Request<Body>) -> Reply {
    let res = app.clone().oneshot(req).await.expect("infallible");
    let status = res.status();
    let headers = res.headers().clone();
    let body = res.into_body().collect().await.expect("body").to_bytes();
    Reply { status, headers, body }
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Reply {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Run SQL through POST /query and assert success.
pub async fn sql(app: &Router, statement: &str, params: Value) -> Value {
    let reply = post_json(app, "/query", serde_json::json!({"sql": statement, "params": params})).await;
    assert_eq!(reply.status, StatusCode::OK, "{}: {}", statement, reply.text());
    reply.json()
}
