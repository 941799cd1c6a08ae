//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use dithertone::models::AppConfig;
use dithertone::server::{build_router, create_app_state, AppState};
use dithertone::services::InMemorySessionStore;

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub sessions: Arc<InMemorySessionStore>,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = create_app_state(config);
        let sessions = state.sessions.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self { router, sessions }
    }

    /// Create app state for custom router configuration
    pub fn create_state() -> AppState {
        create_app_state(AppConfig::default())
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a DELETE request to the given path
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Request::delete(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Make a POST request with a raw body and content type
    pub async fn post_bytes(&self, path: &str, content_type: &str, body: Vec<u8>) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", content_type)
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Upload a PNG and return the new session ID
    pub async fn create_session(&self, png: Vec<u8>) -> String {
        let response = self.post_bytes("/api/sessions", "image/png", png).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {}",
            response.text()
        );

        let json: serde_json::Value = response.json();
        json["session_id"].as_str().unwrap().to_string()
    }

    /// Render a session with JSON parameters
    pub async fn render(&self, session_id: &str, params: &str) -> TestResponse {
        self.post_json(&format!("/api/sessions/{session_id}/render"), params)
            .await
    }

    /// Toggle the view of a session
    pub async fn toggle(&self, session_id: &str) -> TestResponse {
        self.post_empty(&format!("/api/sessions/{session_id}/toggle"))
            .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value as string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    /// Decode the PNG body
    pub fn raster(&self) -> tone_dither::Raster {
        dithertone::rendering::decode_png(&self.body, u64::MAX).expect("Invalid PNG body")
    }
}
