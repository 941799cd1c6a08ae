use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tone_dither::{PipelineError, RasterError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session is busy processing another request")]
    SessionBusy,

    #[error("Upload too large (max {max} bytes)")]
    PayloadTooLarge { max: usize },

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Image too large: {width}x{height} exceeds {max_pixels} pixels")]
    TooManyPixels {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    #[error("Invalid pixel buffer: {0}")]
    Raster(#[from] RasterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::SessionBusy => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Pipeline(e) => match e {
                PipelineError::NothingRendered => StatusCode::CONFLICT,
                PipelineError::InvalidParameter { .. }
                | PipelineError::EmptySource { .. }
                | PipelineError::UnsupportedStyle(_) => StatusCode::BAD_REQUEST,
                PipelineError::DimensionMismatch { .. } | PipelineError::Raster(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Image(e) => match e {
                ImageError::Decode(_)
                | ImageError::UnsupportedDimensions { .. }
                | ImageError::TooManyPixels { .. } => StatusCode::BAD_REQUEST,
                ImageError::Encode(_) | ImageError::Raster(_) | ImageError::Io(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
