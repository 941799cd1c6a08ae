use crate::error::ApiError;
use crate::models::{Session, SessionId};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// A session shared between requests
pub type SharedSession = Arc<Mutex<Session>>;

/// Trait for session storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session and return its ID
    async fn insert(&self, session: Session) -> Result<SessionId, ApiError>;

    /// Find session by ID
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SharedSession>, ApiError>;

    /// Remove a session, returning whether it existed
    async fn remove(&self, id: &SessionId) -> Result<bool, ApiError>;

    /// Number of live sessions
    async fn count(&self) -> usize;

    /// Take exclusive access to a session without waiting.
    ///
    /// A session that is already being worked on is reported as busy instead
    /// of queueing the request behind it.
    async fn acquire(&self, id: &SessionId) -> Result<OwnedMutexGuard<Session>, ApiError> {
        let session = self
            .find_by_id(id)
            .await?
            .ok_or(ApiError::SessionNotFound)?;
        session.try_lock_owned().map_err(|_| {
            tracing::debug!(session_id = %id, "Session busy, rejecting request");
            ApiError::SessionBusy
        })
    }
}

/// Session limit used by [`InMemorySessionStore::new`]
pub const DEFAULT_MAX_SESSIONS: usize = 32;

#[derive(Default)]
struct Sessions {
    by_id: HashMap<SessionId, SharedSession>,
    /// Insertion order, oldest first
    order: VecDeque<SessionId>,
}

/// In-memory session storage.
///
/// Holds at most `max_sessions` sessions; inserting past the limit evicts
/// the oldest ones. A request still holding an evicted session finishes
/// normally, the session is just no longer reachable by ID.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<Sessions>>,
    max_sessions: usize,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_max_sessions(DEFAULT_MAX_SESSIONS)
    }

    /// Create a store holding at most `max_sessions` sessions (at least one)
    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Sessions::default())),
            max_sessions: max_sessions.max(1),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<SessionId, ApiError> {
        let id = session.id.clone();
        let mut sessions = self.sessions.write().await;

        while sessions.by_id.len() >= self.max_sessions {
            let Some(oldest) = sessions.order.pop_front() else {
                break;
            };
            if sessions.by_id.remove(&oldest).is_some() {
                tracing::info!(session_id = %oldest, "Evicted oldest session");
            }
        }

        sessions
            .by_id
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        sessions.order.push_back(id.clone());
        Ok(id)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SharedSession>, ApiError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.by_id.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, ApiError> {
        let mut sessions = self.sessions.write().await;
        let existed = sessions.by_id.remove(id).is_some();
        if existed {
            sessions.order.retain(|queued| queued != id);
        }
        Ok(existed)
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.by_id.len()
    }
}
