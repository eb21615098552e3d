#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wikicache_api::config::{ServerConfig, WikiConfig};
use wikicache_api::router::build_app_router;
use wikicache_api::state::AppState;
use wikicache_db::schema::IN_MEMORY;
use wikicache_db::Storage;
use wikicache_wiki::WikiClient;

/// Endpoint nothing listens on, so every Wikipedia call fails fast.
pub const UNREACHABLE_WIKI: &str = "http://127.0.0.1:9/w/api.php";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(legacy_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_path: IN_MEMORY.into(),
        legacy_dir: legacy_dir.to_path_buf(),
        cors_origins: vec![HeaderValue::from_static("http://localhost:5000")],
        request_timeout_secs: 30,
        wiki: WikiConfig {
            api_url: UNREACHABLE_WIKI.to_string(),
            user_agent: "wikicache-tests".to_string(),
            timeout: Duration::from_secs(2),
        },
    }
}

pub async fn test_storage() -> Storage {
    wikicache_db::initialize(IN_MEMORY).await.unwrap()
}

/// Build the full application router over `storage`, using the same
/// middleware stack as production.
pub fn build_test_app(storage: Storage, legacy_dir: &Path) -> Router {
    build_app_with_config(storage, test_config(legacy_dir))
}

/// Router whose Wikipedia client talks to `api_url` (a mock server).
pub fn build_app_with_wiki(storage: Storage, api_url: &str) -> Router {
    let mut config = test_config(Path::new("/nonexistent/legacy"));
    config.wiki.api_url = api_url.to_string();
    build_app_with_config(storage, config)
}

fn build_app_with_config(storage: Storage, config: ServerConfig) -> Router {
    let wiki = WikiClient::new(
        config.wiki.api_url.clone(),
        &config.wiki.user_agent,
        config.wiki.timeout,
    )
    .unwrap();

    let state = AppState {
        storage,
        config: Arc::new(config.clone()),
        wiki: Arc::new(wiki),
    };
    build_app_router(state, &config)
}

/// Router over `storage` with a legacy directory that does not exist.
pub fn build_app(storage: Storage) -> Router {
    build_test_app(storage, Path::new("/nonexistent/legacy"))
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

/// POST a body verbatim with a JSON content type, for malformed payloads.
pub async fn post_raw_json(app: Router, uri: &str, body: &str) -> Response {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body.to_string()),
        Some("application/x-www-form-urlencoded"),
    )
    .await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
