use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tone_dither::ParamInput;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, SessionId};
use crate::services::{RenderService, RenderedFrame, SessionStore};

/// Response header telling which view a PNG shows
pub const SHOW_ORIGINAL_HEADER: &str = "X-Show-Original";

/// Render a session with new parameters
///
/// Fields left out of the body take the configured defaults. Dither and
/// bloom layers are cached, so repeating the last parameters only
/// re-composites. A request for a session that is still rendering is
/// rejected with 409.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/render",
    request_body = RenderRequest,
    responses(
        (status = 200, description = "Rendered PNG", content_type = "image/png"),
        (status = 400, description = "Unsupported style"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Session is busy"),
    ),
    params(("id" = String, Path, description = "Session ID")),
    tag = "Rendering"
)]
pub async fn handle_render<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(renderer): State<Arc<RenderService>>,
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, ApiError> {
    let input = ParamInput::from(request);
    let params = input.resolve(&config.defaults)?;
    let show_original = input.show_original.unwrap_or(false);

    let session = store.acquire(&SessionId::new(id)).await?;
    let frame = renderer.render(session, params, show_original).await?;
    Ok(png_response(frame, None))
}

/// Switch between the original and the processed view
///
/// Only re-composites from cached layers; fails with 409 if the session was
/// never rendered.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/toggle",
    responses(
        (status = 200, description = "PNG of the new view", content_type = "image/png"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Session is busy or not rendered yet"),
    ),
    params(("id" = String, Path, description = "Session ID")),
    tag = "Rendering"
)]
pub async fn handle_toggle<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(renderer): State<Arc<RenderService>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session = store.acquire(&SessionId::new(id)).await?;
    let frame = renderer.toggle(session).await?;
    Ok(png_response(frame, None))
}

/// Download the current view as a PNG attachment
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/export",
    responses(
        (status = 200, description = "PNG attachment", content_type = "image/png"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Session is busy or not rendered yet"),
    ),
    params(("id" = String, Path, description = "Session ID")),
    tag = "Rendering"
)]
pub async fn handle_export<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(renderer): State<Arc<RenderService>>,
    State(config): State<Arc<AppConfig>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session = store.acquire(&SessionId::new(id)).await?;
    let frame = renderer.export(session).await?;
    Ok(png_response(frame, Some(&config.export_filename)))
}

fn png_response(frame: RenderedFrame, attachment: Option<&str>) -> Response {
    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, frame.png_bytes.len().to_string()),
        ],
        Bytes::from(frame.png_bytes),
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert(
        SHOW_ORIGINAL_HEADER,
        HeaderValue::from_static(if frame.show_original { "true" } else { "false" }),
    );
    if let Some(filename) = attachment {
        let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));
        if let Ok(value) = HeaderValue::from_str(&disposition) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
    }
    response
}

/// Render parameters, all optional
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RenderRequest {
    /// bayer, crosshatch, halftone or contour (case-insensitive)
    pub style: Option<String>,
    /// Pattern strength, negative values become 0
    pub strength: Option<f32>,
    /// Number of output levels, values below 1 become 1
    pub levels: Option<i64>,
    /// Hex color of the darkest level; unparseable values become black
    pub color_start: Option<String>,
    /// Hex color of the brightest level; unparseable values become black
    pub color_end: Option<String>,
    pub bloom_enabled: Option<bool>,
    /// Bloom blur radius in pixels
    pub bloom_intensity: Option<f32>,
    /// Return the original view instead of the processed one
    pub show_original: Option<bool>,
}

impl From<RenderRequest> for ParamInput {
    fn from(req: RenderRequest) -> Self {
        ParamInput {
            style: req.style,
            strength: req.strength,
            levels: req.levels,
            color_start: req.color_start,
            color_end: req.color_end,
            bloom_enabled: req.bloom_enabled,
            bloom_intensity: req.bloom_intensity,
            show_original: req.show_original,
        }
    }
}
