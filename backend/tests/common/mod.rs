//! Common test utilities for integration tests
//!
//! Builds the full router, middleware included, and drives it in-process.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use nutrition_tracker_backend::{
    config::{AppConfig, HttpConfig, ServerConfig},
    routes,
    state::AppState,
};
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(test_config());
        let app = routes::create_router(state);
        Self { app }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        http: HttpConfig {
            request_timeout_secs: 5,
            body_limit_bytes: 16 * 1024,
        },
    }
}

/// Parse a JSON response body
#[allow(dead_code)]
pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("response body is not JSON")
}
