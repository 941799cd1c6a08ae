use crate::error::ApiError;
use crate::models::{AppConfig, Session};
use crate::rendering::{decode_png, encode_png};
use axum::body::Bytes;
use tokio::sync::OwnedMutexGuard;
use tone_dither::{PipelineParams, Raster};

/// Runs decoding, the pipeline and encoding off the async runtime
pub struct RenderService {
    optimize_png: bool,
    max_pixels: u64,
}

/// A rendered view of a session
#[derive(Debug)]
pub struct RenderedFrame {
    pub png_bytes: Vec<u8>,
    pub show_original: bool,
}

impl RenderService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            optimize_png: config.optimize_png,
            max_pixels: config.max_pixels,
        }
    }

    /// Decode an uploaded PNG
    pub async fn decode(&self, bytes: Bytes) -> Result<Raster, ApiError> {
        let max_pixels = self.max_pixels;
        let raster = run_blocking(move || decode_png(&bytes, max_pixels).map_err(ApiError::from))
            .await?;
        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            "Decoded upload"
        );
        Ok(raster)
    }

    /// Run the pipeline with new parameters and store them on the session
    pub async fn render(
        &self,
        mut session: OwnedMutexGuard<Session>,
        params: PipelineParams,
        show_original: bool,
    ) -> Result<RenderedFrame, ApiError> {
        let optimize = self.optimize_png;
        run_blocking(move || {
            let session = &mut *session;
            let frame = session
                .pipeline
                .run(&session.source, &params, show_original)?;
            session.params = Some(params);
            session.show_original = show_original;

            tracing::info!(
                session_id = %session.id,
                style = %params.style,
                levels = params.levels,
                bloom = params.bloom_enabled,
                "Rendered session"
            );
            encode_frame(&frame, show_original, optimize)
        })
        .await
    }

    /// Flip between the original and processed view without re-rendering
    pub async fn toggle(&self, mut session: OwnedMutexGuard<Session>) -> Result<RenderedFrame, ApiError> {
        let optimize = self.optimize_png;
        run_blocking(move || {
            let session = &mut *session;
            let show_original = !session.show_original;
            let frame = session.pipeline.recomposite(&session.source, show_original)?;
            session.show_original = show_original;

            tracing::debug!(session_id = %session.id, show_original, "Toggled view");
            encode_frame(&frame, show_original, optimize)
        })
        .await
    }

    /// Encode the current view
    pub async fn export(&self, mut session: OwnedMutexGuard<Session>) -> Result<RenderedFrame, ApiError> {
        let optimize = self.optimize_png;
        run_blocking(move || {
            let session = &mut *session;
            let show_original = session.show_original;
            let frame = session.pipeline.recomposite(&session.source, show_original)?;
            encode_frame(&frame, show_original, optimize)
        })
        .await
    }
}

fn encode_frame(
    frame: &Raster,
    show_original: bool,
    optimize: bool,
) -> Result<RenderedFrame, ApiError> {
    let png_bytes = encode_png(frame, optimize)?;
    Ok(RenderedFrame {
        png_bytes,
        show_original,
    })
}

/// Execute CPU-intensive work in a blocking context
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("Render task failed: {e}")))?
}
