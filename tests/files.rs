mod common;

use axum::http::StatusCode;
use common::{gateway, get};

#[tokio::test]
async fn root_serves_index_html() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
    let app = gateway(dir.path(), None).await;

    let reply = get(&app, "/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), "<h1>home</h1>");
    assert!(reply.headers["content-type"].to_str().unwrap().starts_with("text/html"));
}

#[tokio::test]
async fn nested_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/site.css"), "body{}").unwrap();
    let app = gateway(dir.path(), None).await;

    let reply = get(&app, "/assets/site.css").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), "body{}");
    assert!(reply.headers["content-type"].to_str().unwrap().starts_with("text/css"));
}

#[tokio::test]
async fn unmatched_static_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = gateway(dir.path(), None).await;
    assert_eq!(get(&app, "/missing.html").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn traversal_outside_root_is_refused() {
    let parent = tempfile::tempdir().unwrap();
    std::fs::write(parent.path().join("secret.txt"), "secret").unwrap();
    let root = parent.path().join("public");
    std::fs::create_dir_all(&root).unwrap();
    let app = gateway(&root, None).await;

    let reply = get(&app, "/../secret.txt").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    let reply = get(&app, "/%2e%2e/secret.txt").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_routes() {
    let dir = tempfile::tempdir().unwrap();
    let app = gateway(dir.path(), None).await;

    let reply = get(&app, "/_gateway/health").await;
    assert_eq!(reply.json(), serde_json::json!({"status": "ok"}));
    let reply = get(&app, "/_gateway/ready").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["database"], "ok");
    let reply = get(&app, "/_gateway/version").await;
    assert_eq!(reply.json()["name"], "sqlite-gateway");
}
