use axum::response::Json;
use serde::Serialize;
use tone_dither::DitherStyle;
use utoipa::ToSchema;

/// Supported dither styles
#[derive(Debug, Serialize, ToSchema)]
pub struct StylesResponse {
    /// Style names accepted by the `style` render parameter
    pub styles: Vec<String>,
}

/// List supported dither styles
#[utoipa::path(
    get,
    path = "/api/styles",
    responses(
        (status = 200, description = "Style names", body = StylesResponse),
    ),
    tag = "Rendering"
)]
pub async fn handle_styles() -> Json<StylesResponse> {
    Json(StylesResponse {
        styles: DitherStyle::ALL
            .iter()
            .map(|style| style.as_str().to_string())
            .collect(),
    })
}
