use moka::future::Cache;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::selection::DateRangeSelector;

pub type Session = Arc<Mutex<DateRangeSelector>>;

/// Apply-leave sessions, one selector each. Sessions idle longer than the
/// ttl are dropped, which is the same as leaving apply mode.
#[derive(Clone)]
pub struct SelectionStore {
    sessions: Cache<Uuid, Session>,
}

impl SelectionStore {
    pub fn new(max_sessions: u64, ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_idle(ttl)
                .build(),
        }
    }

    /// Start a fresh selection session
    pub async fn create(&self) -> (Uuid, Session) {
        let id = Uuid::new_v4();
        let mut selector = DateRangeSelector::new();
        selector.begin_selection();
        let session = Arc::new(Mutex::new(selector));
        self.sessions.insert(id, session.clone()).await;
        tracing::debug!(session_id = %id, "Selection session created");
        (id, session)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Session, ApiError> {
        self.sessions.get(id).await.ok_or(ApiError::SessionNotFound)
    }

    pub async fn remove(&self, id: &Uuid) -> Result<(), ApiError> {
        self.sessions
            .remove(id)
            .await
            .map(|_| ())
            .ok_or(ApiError::SessionNotFound)
    }
}

/// Lock a session for one state transition
pub fn lock(session: &Session) -> Result<MutexGuard<'_, DateRangeSelector>, ApiError> {
    session.lock().map_err(|e| {
        tracing::error!(error = %e, "Selection session mutex poisoned");
        ApiError::SessionPoisoned
    })
}
