pub mod render_service;
pub mod session_store;

pub use render_service::{RenderService, RenderedFrame};
pub use session_store::{InMemorySessionStore, SessionStore, SharedSession, DEFAULT_MAX_SESSIONS};
