//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use auth::{AppState, config::AppConfig, database, routes::create_router};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use common::database::{DatabaseConfig, init_pool};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ALLOWED_ORIGIN: &str = "https://study.example.com";

/// Configuration pointing at a private in-memory database
pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        allowed_origins: auth::config::parse_origins(ALLOWED_ORIGIN),
        jwt_secret: TEST_SECRET.to_string(),
        database: DatabaseConfig::new("sqlite::memory:", 1),
        cookie_secure: false,
    }
}

/// Create a test application state with a migrated in-memory database
pub async fn create_test_state() -> AppState {
    let config = test_config();
    let pool = init_pool(&config.database)
        .await
        .expect("Failed to create test database");
    database::migrate(&pool)
        .await
        .expect("Failed to apply schema");

    AppState::new(&config, pool)
}

/// Create the full router over a fresh database
pub async fn create_test_app() -> Router {
    create_router(create_test_state().await)
}

/// Send one request through the router
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("Router failed to respond")
}

/// Build a JSON POST request, optionally carrying a session cookie
pub fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={}", token));
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Build a GET request, optionally carrying a session cookie
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("token={}", token));
    }

    builder.body(Body::empty()).expect("Failed to build request")
}

/// Read the whole response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// All `Set-Cookie` header values of a response
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().expect("Non-ASCII cookie").to_string())
        .collect()
}

/// Value of the `token` cookie set by a response, if any
pub fn session_token(response: &Response<Body>) -> Option<String> {
    set_cookies(response).into_iter().find_map(|cookie| {
        let first = cookie.split(';').next()?.trim().to_string();
        first.strip_prefix("token=").map(str::to_string)
    })
}
