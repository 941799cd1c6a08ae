use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{AppConfig, Session, SessionId, SessionInfo};
use crate::rendering::is_png;
use crate::services::{RenderService, SessionStore};

/// Upload a PNG and open a session for it
///
/// The body is the raw PNG file. The image is decoded to RGBA once and kept
/// for all later renders of this session.
#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body(content = Vec<u8>, content_type = "image/png", description = "PNG file"),
    responses(
        (status = 201, description = "Session created", body = SessionInfo),
        (status = 400, description = "Not a PNG, undecodable or empty image"),
        (status = 413, description = "Upload exceeds the configured limit"),
    ),
    tag = "Sessions"
)]
pub async fn handle_create_session<S: SessionStore>(
    State(store): State<Arc<S>>,
    State(renderer): State<Arc<RenderService>>,
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
    body: Body,
) -> Result<(StatusCode, Json<SessionInfo>), ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.starts_with("image/png") {
        return Err(ApiError::BadRequest(format!(
            "expected Content-Type: image/png, got {content_type:?}"
        )));
    }

    let max = config.max_upload_bytes;
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > max) {
        return Err(ApiError::PayloadTooLarge { max });
    }

    let bytes = axum::body::to_bytes(body, max)
        .await
        .map_err(|_| ApiError::PayloadTooLarge { max })?;
    if !is_png(&bytes) {
        return Err(ApiError::BadRequest("body is not a PNG image".to_string()));
    }

    let source = renderer.decode(bytes).await?;
    let session = Session::new(source);
    let info = session.info();
    let id = store.insert(session).await?;

    tracing::info!(
        session_id = %id,
        width = info.width,
        height = info.height,
        "Session created"
    );

    Ok((StatusCode::CREATED, Json(info)))
}

/// Get session metadata
#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    responses(
        (status = 200, description = "Session metadata", body = SessionInfo),
        (status = 404, description = "Unknown session"),
    ),
    params(("id" = String, Path, description = "Session ID")),
    tag = "Sessions"
)]
pub async fn handle_get_session<S: SessionStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<SessionInfo>, ApiError> {
    let session = store
        .find_by_id(&SessionId::new(id))
        .await?
        .ok_or(ApiError::SessionNotFound)?;
    let info = session.lock().await.info();
    Ok(Json(info))
}

/// Delete a session and its cached layers
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Unknown session"),
    ),
    params(("id" = String, Path, description = "Session ID")),
    tag = "Sessions"
)]
pub async fn handle_delete_session<S: SessionStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = SessionId::new(id);
    if !store.remove(&id).await? {
        return Err(ApiError::SessionNotFound);
    }
    tracing::info!(session_id = %id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}
