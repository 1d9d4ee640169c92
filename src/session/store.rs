/*!
 * In-memory session store with per-session atomic updates.
 *
 * Concurrent mutators for the same session id are serialized by a
 * per-session async mutex; mutators for different session ids proceed
 * independently. The map-level lock is only ever held to look up or insert
 * an entry, never across an await point, and the per-session lock is never
 * held across remote I/O (translation completes before `upsert` is entered).
 */

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::models::{SessionSnapshot, SessionState};

/// One store slot: the state guarded by its per-session lock
struct SessionEntry {
    state: Mutex<SessionState>,
}

impl SessionEntry {
    fn new(id: &str) -> Self {
        Self {
            state: Mutex::new(SessionState::new(id)),
        }
    }
}

/// Addressable, concurrently-accessible table of session states.
///
/// Sessions are created lazily on first reference, by reads and writes
/// alike, and are never explicitly deleted.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<SessionEntry>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up or lazily create the entry for a session id
    fn entry(&self, session_id: &str) -> Arc<SessionEntry> {
        if let Some(entry) = self.sessions.read().get(session_id) {
            return Arc::clone(entry);
        }

        let mut sessions = self.sessions.write();
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(SessionEntry::new(session_id))),
        )
    }

    /// Snapshot a session if it exists
    pub async fn get(&self, session_id: &str) -> Option<SessionSnapshot> {
        let entry = {
            let sessions = self.sessions.read();
            sessions.get(session_id).map(Arc::clone)
        }?;

        let state = entry.state.lock().await;
        Some(state.snapshot())
    }

    /// Snapshot a session, creating it if unseen
    pub async fn get_or_create(&self, session_id: &str) -> SessionSnapshot {
        let entry = self.entry(session_id);
        let state = entry.state.lock().await;
        state.snapshot()
    }

    /// Apply a mutation atomically for one session id.
    ///
    /// The mutator runs under the per-session lock; the revision stamp is
    /// advanced and `updated_at` refreshed after it returns, so every
    /// accepted mutation moves the revision by exactly one.
    pub async fn upsert<F>(&self, session_id: &str, mutator: F) -> SessionSnapshot
    where
        F: FnOnce(&mut SessionState),
    {
        let entry = self.entry(session_id);
        let mut state = entry.state.lock().await;

        mutator(&mut state);
        state.revision += 1;
        state.updated_at = chrono::Utc::now().to_rfc3339();

        state.snapshot()
    }

    /// Number of sessions currently in the table
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// True if no session has been referenced yet
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
