/*!
 * Session synchronization: applying edits and propagating state.
 *
 * The synchronizer is the only writer of the session store. Every accepted
 * edit is applied under the store's per-session discipline, then propagated
 * to subscribers over a per-session broadcast channel (push path) and made
 * visible to staleness checks (pull path).
 *
 * Consistency model: last-writer-wins at whole-session granularity, ordered
 * by arrival at the store, not by client-side timestamp. A device with
 * higher network latency can have its edit silently superseded; eventual
 * convergence, not strong consistency.
 */

use log::{debug, info};
use parking_lot::RwLock;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::errors::SyncError;
use crate::lang::{Language, LanguageText};

use super::models::SessionSnapshot;
use super::store::SessionStore;

/// Buffered snapshots per subscriber before a slow reader starts lagging
const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Outcome of a staleness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The reader already has the latest revision
    Unchanged,

    /// The stored revision is newer; here is the full state
    Changed(SessionSnapshot),
}

impl PollOutcome {
    /// True if new state was returned
    pub fn is_changed(&self) -> bool {
        matches!(self, PollOutcome::Changed(_))
    }
}

// Wire shape: {"changed":false} or {"changed":true,"state":{...}}
impl Serialize for PollOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PollOutcome::Unchanged => {
                let mut s = serializer.serialize_struct("PollOutcome", 1)?;
                s.serialize_field("changed", &false)?;
                s.end()
            }
            PollOutcome::Changed(state) => {
                let mut s = serializer.serialize_struct("PollOutcome", 2)?;
                s.serialize_field("changed", &true)?;
                s.serialize_field("state", state)?;
                s.end()
            }
        }
    }
}

/// A device's live association with one session
pub struct Subscription {
    /// State at subscribe time, delivered as the initial sync
    pub initial: SessionSnapshot,

    /// Live channel of snapshots pushed on every subsequent edit
    pub updates: broadcast::Receiver<SessionSnapshot>,
}

/// Applies edits to the session store and fans state out to devices
pub struct Synchronizer {
    /// The authoritative session table
    store: Arc<SessionStore>,

    /// Per-session push channels
    channels: RwLock<HashMap<String, broadcast::Sender<SessionSnapshot>>>,

    /// Capacity of each push channel
    channel_capacity: usize,
}

impl Synchronizer {
    /// Create a synchronizer over the given store
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self::with_capacity(store, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a synchronizer with an explicit push-channel capacity
    pub fn with_capacity(store: Arc<SessionStore>, channel_capacity: usize) -> Self {
        Self {
            store,
            channels: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Apply one edit and propagate the resulting state.
    ///
    /// Within one atomic upsert: the edited language's slot takes `text`,
    /// the other two slots take the matching entries from `translations`,
    /// the active language moves to the edited language, and the revision
    /// advances. An empty `text` is a normal edit that clears the slots.
    pub async fn apply_edit(
        &self,
        session_id: &str,
        language: Language,
        text: &str,
        translations: &LanguageText,
    ) -> Result<SessionSnapshot, SyncError> {
        validate_session_id(session_id)?;

        let snapshot = self
            .store
            .upsert(session_id, |state| {
                state.texts.set(language, text);
                for target in Language::targets_of(language) {
                    state.texts.set(target, translations.get(target));
                }
                state.active_language = language;
            })
            .await;

        debug!(
            "Applied edit to session {} ({}, revision {})",
            session_id, language, snapshot.revision
        );
        self.notify(session_id, snapshot.clone());
        Ok(snapshot)
    }

    /// Subscribe a device to a session.
    ///
    /// The receiver is registered before the state is read, so an edit
    /// landing in between is delivered on the channel rather than lost; a
    /// subscriber may then see the same revision twice, never a gap.
    pub async fn subscribe(&self, session_id: &str) -> Result<Subscription, SyncError> {
        validate_session_id(session_id)?;

        let updates = self.sender(session_id).subscribe();
        let initial = self.store.get_or_create(session_id).await;

        info!(
            "Device subscribed to session {} at revision {}",
            session_id, initial.revision
        );
        Ok(Subscription { initial, updates })
    }

    /// Staleness check for polling readers.
    ///
    /// Returns the full state only if the stored revision is strictly
    /// greater than the reader's, keeping frequent polling loops cheap.
    pub async fn poll(
        &self,
        session_id: &str,
        since_revision: u64,
    ) -> Result<PollOutcome, SyncError> {
        validate_session_id(session_id)?;

        let snapshot = self.store.get_or_create(session_id).await;
        if snapshot.revision > since_revision {
            Ok(PollOutcome::Changed(snapshot))
        } else {
            Ok(PollOutcome::Unchanged)
        }
    }

    /// Current subscriber count for a session
    pub fn subscriber_count(&self, session_id: &str) -> usize {
        self.channels
            .read()
            .get(session_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Look up or create the push channel for a session
    fn sender(&self, session_id: &str) -> broadcast::Sender<SessionSnapshot> {
        if let Some(sender) = self.channels.read().get(session_id) {
            return sender.clone();
        }

        let mut channels = self.channels.write();
        channels
            .entry(session_id.to_string())
            .or_insert_with(|| broadcast::channel(self.channel_capacity).0)
            .clone()
    }

    /// Push a snapshot to all current subscribers; prune dead channels
    fn notify(&self, session_id: &str, snapshot: SessionSnapshot) {
        let sender = {
            let channels = self.channels.read();
            match channels.get(session_id) {
                Some(sender) => sender.clone(),
                None => return,
            }
        };

        if sender.send(snapshot).is_err() && sender.receiver_count() == 0 {
            // Nobody is listening; drop the channel until the next subscribe
            self.channels.write().remove(session_id);
        }
    }
}

/// Reject malformed session identifiers before touching the store
fn validate_session_id(session_id: &str) -> Result<(), SyncError> {
    if session_id.trim().is_empty() {
        return Err(SyncError::InvalidRequest(
            "session id must not be empty".to_string(),
        ));
    }
    Ok(())
}
