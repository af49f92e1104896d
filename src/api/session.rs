use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat::ConversationLog;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// A session's log. The async mutex is held for a whole interaction, so two
/// requests from the same browser never interleave.
pub type SharedLog = Arc<tokio::sync::Mutex<ConversationLog>>;

struct Session {
    log: SharedLog,
    last_used: Instant,
}

/// In-memory sessions keyed by cookie id. Nothing survives a restart, and a
/// session idle for longer than the timeout is dropped.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self { sessions: Mutex::new(HashMap::new()), idle_timeout }
    }

    /// Returns the live session for `id` without creating one.
    pub fn get(&self, id: Option<Uuid>) -> Option<(Uuid, SharedLog)> {
        let id = id?;
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        self.prune(&mut sessions);

        let session = sessions.get_mut(&id)?;
        session.last_used = Instant::now();
        Some((id, session.log.clone()))
    }

    /// Returns the log for `id`, starting a fresh session when the id is
    /// missing, unknown or expired.
    pub fn open(&self, id: Option<Uuid>) -> (Uuid, SharedLog) {
        if let Some(found) = self.get(id) {
            return found;
        }
        if let Some(id) = id {
            debug!("Unknown session {}, starting a new one", id);
        }

        let id = Uuid::new_v4();
        let log = SharedLog::default();
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Session { log: log.clone(), last_used: Instant::now() });
        info!("Started session {}", id);
        (id, log)
    }

    /// Drops the session's log. Returns whether it existed.
    pub fn end(&self, id: Uuid) -> bool {
        let removed = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            info!("Ended session {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, Session>) {
        let now = Instant::now();
        sessions.retain(|id, session| {
            let live = now.duration_since(session.last_used) < self.idle_timeout;
            if !live {
                info!("Session {} expired after {:?} idle", id, self.idle_timeout);
            }
            live
        });
    }
}
