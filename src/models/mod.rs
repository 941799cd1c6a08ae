pub mod config;
pub mod session;

pub use config::{AppConfig, DEFAULT_BIND_ADDR};
pub use session::{Session, SessionId, SessionInfo, SESSION_ID_LEN};
