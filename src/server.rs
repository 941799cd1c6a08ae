//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header::CACHE_CONTROL, HeaderMap, HeaderValue, StatusCode},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api::{self, RenderRequest};
use crate::error::ApiError;
use crate::models::{AppConfig, SessionInfo};
use crate::services::{InMemorySessionStore, RenderService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<InMemorySessionStore>,
    pub renderer: Arc<RenderService>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let renderer = Arc::new(RenderService::new(&config));
    let sessions = Arc::new(InMemorySessionStore::with_max_sessions(config.max_sessions));
    AppState {
        config: Arc::new(config),
        sessions,
        renderer,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. Every
/// response is marked `Cache-Control: no-store`, since session views change
/// under the same URL.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/sessions", post(handle_create_session))
        .route(
            "/api/sessions/:id",
            get(handle_get_session).delete(handle_delete_session),
        )
        .route("/api/sessions/:id/render", post(handle_render))
        .route("/api/sessions/:id/toggle", post(handle_toggle))
        .route("/api/sessions/:id/export", get(handle_export))
        .route("/api/styles", get(api::handle_styles))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Json<SessionInfo>), ApiError> {
    api::handle_create_session(
        State(state.sessions),
        State(state.renderer),
        State(state.config),
        headers,
        body,
    )
    .await
}

async fn handle_get_session(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Json<SessionInfo>, ApiError> {
    api::handle_get_session(State(state.sessions), path).await
}

async fn handle_delete_session(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<StatusCode, ApiError> {
    api::handle_delete_session(State(state.sessions), path).await
}

async fn handle_render(
    State(state): State<AppState>,
    path: Path<String>,
    body: Json<RenderRequest>,
) -> Result<Response, ApiError> {
    api::handle_render(
        State(state.sessions),
        State(state.renderer),
        State(state.config),
        path,
        body,
    )
    .await
}

async fn handle_toggle(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Response, ApiError> {
    api::handle_toggle(State(state.sessions), State(state.renderer), path).await
}

async fn handle_export(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<Response, ApiError> {
    api::handle_export(
        State(state.sessions),
        State(state.renderer),
        State(state.config),
        path,
    )
    .await
}
