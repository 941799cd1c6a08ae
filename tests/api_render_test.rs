//! Tests for rendering, view toggling and export.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use dithertone::models::{AppConfig, SessionId};
use dithertone::services::SessionStore;
use tone_dither::{Color, PipelineParams, Raster};

#[tokio::test]
async fn test_render_white_bayer_two_levels() {
    let app = TestApp::new();
    let id = app.create_session(fixtures::png(&fixtures::white(2, 2))).await;

    let response = app
        .render(
            &id,
            r##"{"style": "bayer", "strength": 1, "levels": 2,
                "color_start": "#000000", "color_end": "#FFFFFF"}"##,
        )
        .await;

    common::assert_view(&response, false);
    assert_eq!(response.raster(), Raster::filled(2, 2, [255, 255, 255, 255]));
}

#[tokio::test]
async fn test_render_uses_configured_defaults() {
    let app = TestApp::with_config(AppConfig {
        defaults: PipelineParams::new()
            .levels(2)
            .colors(Color::new(0, 0, 0), Color::new(255, 0, 0)),
        ..AppConfig::default()
    });
    let id = app.create_session(fixtures::png(&fixtures::white(2, 2))).await;

    let response = app.render(&id, "{}").await;
    assert_eq!(response.raster().pixel(1, 1), [255, 0, 0, 255]);
}

#[tokio::test]
async fn test_render_unknown_style_is_400() {
    let app = TestApp::new();
    let id = app.create_session(fixtures::png(&fixtures::white(2, 2))).await;

    let response = app.render(&id, r#"{"style": "stipple"}"#).await;
    common::assert_json_error(&response, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("stipple"));
}

#[tokio::test]
async fn test_render_invalid_color_becomes_black() {
    let app = TestApp::new();
    let id = app.create_session(fixtures::png(&fixtures::white(2, 2))).await;

    let response = app
        .render(&id, r#"{"levels": 2, "color_end": "not-a-color"}"#)
        .await;
    common::assert_png(&response);
    assert_eq!(response.raster().pixel(0, 0), [0, 0, 0, 255]);
}

#[tokio::test]
async fn test_render_preserves_alpha() {
    let app = TestApp::new();
    let source = fixtures::ramp(9, 6);
    let id = app.create_session(fixtures::png(&source)).await;

    for style in ["bayer", "crosshatch", "halftone", "contour"] {
        let response = app
            .render(&id, &format!(r#"{{"style": "{style}", "levels": 3}}"#))
            .await;
        let out = response.raster();
        for ((x, y, before), (_, _, after)) in source.pixels().zip(out.pixels()) {
            assert_eq!(before[3], after[3], "{style} changed alpha at ({x}, {y})");
        }
    }
}

#[tokio::test]
async fn test_bloom_brightens_only_highlights() {
    let app = TestApp::new();
    let id = app.create_session(fixtures::png(&fixtures::white_black())).await;

    let response = app
        .render(
            &id,
            r##"{"levels": 2, "color_end": "#E0E0E0",
                "bloom_enabled": true, "bloom_intensity": 0}"##,
        )
        .await;

    let out = response.raster();
    assert_eq!(out.pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(out.pixel(1, 0), [0, 0, 0, 255]);
}

#[tokio::test]
async fn test_toggle_before_render_is_409() {
    let app = TestApp::new();
    let id = app.create_session(fixtures::png(&fixtures::white(2, 2))).await;

    common::assert_json_error(&app.toggle(&id).await, StatusCode::CONFLICT);
    common::assert_json_error(
        &app.get(&format!("/api/sessions/{id}/export")).await,
        StatusCode::CONFLICT,
    );
}

#[tokio::test]
async fn test_double_toggle_restores_processed_view() {
    let app = TestApp::new();
    let source = fixtures::ramp(12, 12);
    let id = app.create_session(fixtures::png(&source)).await;

    let processed = app
        .render(&id, r#"{"style": "halftone", "bloom_enabled": true}"#)
        .await;
    common::assert_view(&processed, false);

    let original = app.toggle(&id).await;
    common::assert_view(&original, true);
    assert_eq!(original.raster(), source);

    let back = app.toggle(&id).await;
    common::assert_view(&back, false);
    assert_eq!(back.raster(), processed.raster());

    // Neither toggle re-ran the dither pass
    let session = app
        .sessions
        .find_by_id(&SessionId::new(id.as_str()))
        .await
        .unwrap()
        .unwrap();
    let stats = session.lock().await.pipeline.stats();
    assert_eq!(stats.dither_passes, 1);
    assert_eq!(stats.bloom_passes, 1);
}

#[tokio::test]
async fn test_render_with_show_original() {
    let app = TestApp::new();
    let source = fixtures::ramp(4, 4);
    let id = app.create_session(fixtures::png(&source)).await;

    let response = app.render(&id, r#"{"show_original": true}"#).await;
    common::assert_view(&response, true);
    assert_eq!(response.raster(), source);

    let json: serde_json::Value = app.get(&format!("/api/sessions/{id}")).await.json();
    assert_eq!(json["show_original"], true);

    // A render without the flag switches back to the processed view
    common::assert_view(&app.render(&id, "{}").await, false);
}

#[tokio::test]
async fn test_repeat_render_hits_cache() {
    let app = TestApp::new();
    let id = app.create_session(fixtures::png(&fixtures::ramp(8, 8))).await;

    let body = r#"{"style": "contour", "levels": 5}"#;
    let first = app.render(&id, body).await;
    let second = app.render(&id, body).await;
    assert_eq!(first.raster(), second.raster());

    let session = app
        .sessions
        .find_by_id(&SessionId::new(id.as_str()))
        .await
        .unwrap()
        .unwrap();
    let stats = session.lock().await.pipeline.stats();
    assert_eq!(stats.dither_passes, 1);
    assert_eq!(stats.cache_hits, 1);
}

#[tokio::test]
async fn test_busy_session_is_409() {
    let app = TestApp::new();
    let id = app.create_session(fixtures::png(&fixtures::white(2, 2))).await;

    // Hold the session lock as an in-flight render would
    let _guard = app
        .sessions
        .acquire(&SessionId::new(id.as_str()))
        .await
        .unwrap();

    common::assert_json_error(&app.render(&id, "{}").await, StatusCode::CONFLICT);
    common::assert_json_error(&app.toggle(&id).await, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_export_is_attachment_of_current_view() {
    let app = TestApp::new();
    let source = fixtures::ramp(6, 6);
    let id = app.create_session(fixtures::png(&source)).await;

    let processed = app.render(&id, r#"{"style": "crosshatch"}"#).await;

    let export = app.get(&format!("/api/sessions/{id}/export")).await;
    common::assert_view(&export, false);
    assert_eq!(
        export.header("content-disposition"),
        Some("attachment; filename=\"dithertone-export.png\"")
    );
    assert_eq!(export.raster(), processed.raster());

    app.toggle(&id).await;
    let export = app.get(&format!("/api/sessions/{id}/export")).await;
    common::assert_view(&export, true);
    assert_eq!(export.raster(), source);
}

#[tokio::test]
async fn test_optimized_export_decodes_identically() {
    let app = TestApp::with_config(AppConfig {
        optimize_png: true,
        export_filename: "custom.png".to_string(),
        ..AppConfig::default()
    });
    let id = app.create_session(fixtures::png(&fixtures::ramp(10, 10))).await;

    let processed = app.render(&id, r#"{"levels": 3}"#).await;
    let export = app.get(&format!("/api/sessions/{id}/export")).await;

    common::assert_png(&export);
    assert_eq!(
        export.header("content-disposition"),
        Some("attachment; filename=\"custom.png\"")
    );
    assert_eq!(export.raster(), processed.raster());
}
