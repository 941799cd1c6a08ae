use serde::Deserialize;
use std::path::Path;
use tone_dither::PipelineParams;

use crate::services::DEFAULT_MAX_SESSIONS;

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Listen address for `serve` (overridden by `BIND_ADDR`)
    pub bind_addr: String,

    /// Request body limit for uploads, in bytes
    pub max_upload_bytes: usize,

    /// Largest accepted image, in pixels
    pub max_pixels: u64,

    /// Sessions kept in memory; the oldest is evicted past this
    pub max_sessions: usize,

    /// Re-compress exported PNGs with oxipng
    pub optimize_png: bool,

    /// Filename offered by the export endpoint
    pub export_filename: String,

    /// Parameter defaults for fields a request leaves out
    pub defaults: PipelineParams,
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: 32 * 1024 * 1024,
            max_pixels: 50_000_000,
            max_sessions: DEFAULT_MAX_SESSIONS,
            optimize_png: false,
            export_filename: "dithertone-export.png".to_string(),
            defaults: PipelineParams::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        bind_addr = %config.bind_addr,
                        optimize_png = config.optimize_png,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.defaults = config.defaults.sanitized();
        Ok(config)
    }

    /// Apply environment overrides (`BIND_ADDR`)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(addr) = std::env::var("BIND_ADDR") {
            self.bind_addr = addr;
        }
        self
    }
}
