/// Common test utilities for DealerHub integration tests
///
/// This file contains shared functions and utilities for all integration
/// tests: test application setup against in-memory databases, helpers for
/// driving the router, and cookie extraction.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use serde_json::Value;
use std::sync::Arc;
use tower::Service;

use dealerhub::{
    AppState,
    clients::{DealerClient, SentimentClient},
    create_app, db, run_migrations,
};

/// Creates a test application whose outbound clients point at closed ports
///
/// Suitable for every test that never reaches the dealer proxy layer.
#[allow(dead_code)]
pub fn create_test_app() -> Router {
    create_test_app_with_upstreams("http://127.0.0.1:9", "http://127.0.0.1:9")
}

/// Creates a test application against explicit upstream base URLs
///
/// This helper:
/// 1. Creates a unique shared in-memory SQLite database
/// 2. Runs the embedded migrations to set up the schema
/// 3. Builds the clients against the given URLs (usually wiremock servers)
///
/// Using an in-memory database ensures that:
/// - Tests run quickly
/// - Tests are isolated from each other
/// - No cleanup is needed after tests
pub fn create_test_app_with_upstreams(dealer_url: &str, sentiment_url: &str) -> Router {
    // Plain ":memory:" would give every pooled connection its own database;
    // a unique shared URI keeps the pool coherent and the tests isolated.
    let database_url = format!(
        "file:test_{}?mode=memory&cache=shared",
        uuid::Uuid::new_v4()
    );
    let pool = Arc::new(db::init_pool(&database_url));

    let conn = &mut pool.get().unwrap();
    run_migrations(conn);

    let state = AppState {
        pool,
        dealer: DealerClient::new(dealer_url).unwrap(),
        sentiment: SentimentClient::new(sentiment_url).unwrap(),
    };

    create_app(state)
}

/// Sends a JSON request and returns status, headers, and the parsed body
pub async fn send_json(
    app: &mut Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Extractor rejections answer with plain text, not JSON
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, headers, value)
}

/// Sends a GET request and returns status and the parsed body
#[allow(dead_code)]
pub async fn send_get(app: &mut Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();

    (status, value)
}

/// Sends a request carrying a Cookie header and returns status and body
#[allow(dead_code)]
pub async fn send_json_with_cookie(
    app: &mut Router,
    method: &str,
    uri: &str,
    cookie: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();

    (status, value)
}

/// Sends a request with an arbitrary (possibly non-JSON) body
#[allow(dead_code)]
pub async fn send_raw(
    app: &mut Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: &'static str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::from(body)).unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

/// Pulls the `sessionid=...` pair out of a Set-Cookie header, if present
#[allow(dead_code)]
pub fn session_cookie_from(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = raw.split(';').next()?;
    pair.starts_with("sessionid=").then(|| pair.to_string())
}

/// Registers a user via the API and returns the session cookie pair
#[allow(dead_code)]
pub async fn register_user(app: &mut Router, username: &str, password: &str) -> String {
    let (status, headers, body) = send_json(
        app,
        "POST",
        "/register",
        serde_json::json!({
            "userName": username,
            "password": password,
            "firstName": "Test",
            "lastName": "User",
            "email": format!("{}@example.com", username),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Authenticated");

    session_cookie_from(&headers).expect("registration should set a session cookie")
}
