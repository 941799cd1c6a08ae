use serde::{Deserialize, Serialize};
use std::fmt;
use tone_dither::{Pipeline, PipelineParams, Raster};
use utoipa::ToSchema;

/// Length of generated session identifiers
pub const SESSION_ID_LEN: usize = 16;

/// Session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        use rand::Rng;
        let id: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(SESSION_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One uploaded source image with its pipeline cache and view state
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub source: Raster,
    pub pipeline: Pipeline,
    /// Parameters of the last successful render
    pub params: Option<PipelineParams>,
    pub show_original: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn new(source: Raster) -> Self {
        Self {
            id: SessionId::generate(),
            source,
            pipeline: Pipeline::new(),
            params: None,
            show_original: false,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.params.is_some()
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id.to_string(),
            width: self.source.width(),
            height: self.source.height(),
            fingerprint: self.source.fingerprint().to_hex(),
            created_at: self.created_at,
            show_original: self.show_original,
            rendered: self.is_rendered(),
        }
    }
}

/// Session metadata returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionInfo {
    /// Identifier to use in `/api/sessions/{id}/...`
    pub session_id: String,
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
    /// SHA-256 of the decoded source pixels (hex)
    pub fingerprint: String,
    /// Upload time
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Whether the current view is the untouched original
    pub show_original: bool,
    /// Whether the session has been rendered at least once
    pub rendered: bool,
}
