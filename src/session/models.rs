/*!
 * Session state models and wire DTOs.
 *
 * A session is the shared, multi-device-visible unit of translation state.
 * `SessionState` is the store-owned record; `SessionSnapshot` is the
 * immutable copy handed to subscribers and poll responses.
 */

use serde::{Deserialize, Serialize};

use crate::lang::{Language, LanguageText};

/// Store-owned state for one session
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Opaque session identifier
    pub id: String,

    /// Current text for all three languages
    pub texts: LanguageText,

    /// The language most recently edited
    pub active_language: Language,

    /// Monotonic freshness marker; 0 until the first edit is applied
    pub revision: u64,

    /// Creation time (RFC 3339)
    pub created_at: String,

    /// Last update time (RFC 3339)
    pub updated_at: String,
}

impl SessionState {
    /// Create a fresh session with empty text slots
    pub fn new(id: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id.into(),
            texts: LanguageText::empty(),
            active_language: Language::English,
            revision: 0,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Take an immutable snapshot of the current state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            texts: self.texts.clone(),
            active_language: self.active_language,
            revision: self.revision,
            updated_at: self.updated_at.clone(),
        }
    }
}

/// Immutable view of a session, pushed to subscribers and returned to polls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Session identifier
    pub session_id: String,

    /// Text for all three languages
    pub texts: LanguageText,

    /// The language most recently edited
    pub active_language: Language,

    /// Revision the snapshot was taken at
    pub revision: u64,

    /// Last update time (RFC 3339)
    pub updated_at: String,
}

/// An edit submitted by a device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    /// Session to apply the edit to
    pub session_id: String,

    /// The language being authored
    pub language: Language,

    /// The new text for that language (may be empty: a clear is a normal edit)
    pub text: String,
}

/// A staleness check from a polling reader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollRequest {
    /// Session to check
    pub session_id: String,

    /// The last revision the reader observed
    pub since_revision: u64,
}
