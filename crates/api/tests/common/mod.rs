use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use roomlift_api::config::ServerConfig;
use roomlift_api::router::build_app_router;
use roomlift_api::state::AppState;
use roomlift_replicate::ReplicateApi;

/// Bearer token expected by the test app.
pub const TEST_TOKEN: &str = "test-token";

/// Build a test `ServerConfig` with safe defaults.
///
/// The inference service URL points at a closed local port so any test
/// that accidentally reaches submission fails fast instead of touching
/// the network.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        api_token: TEST_TOKEN.to_string(),
        replicate_api_url: "http://127.0.0.1:9".to_string(),
        replicate_api_key: "test-key".to_string(),
        replicate_model_version: "test-version".to_string(),
        poll_interval_ms: 1,
        poll_max_attempts: 3,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let replicate = Arc::new(ReplicateApi::new(
        config.replicate_api_url.clone(),
        config.replicate_api_key.clone(),
        config.replicate_model_version.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        replicate,
    };

    build_app_router(state, &config)
}

/// Send a GET request (no auth header).
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Send an authenticated GET request.
pub async fn get_authed(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {TEST_TOKEN}"))
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Send an authenticated POST with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {TEST_TOKEN}"))
            .body(Body::from(body.to_string()))
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Send a POST with a JSON body and no Authorization header.
pub async fn post_json_unauthed(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds"),
    )
    .await
    .expect("request succeeds")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Assert a response is an error with the given status and return its
/// JSON body.
pub async fn expect_error(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert!(json["error"].is_string(), "error body: {json}");
    json
}
