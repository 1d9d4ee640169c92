/*!
 * Session state and synchronization.
 *
 * This module holds the authoritative translation state shared by devices:
 *
 * - `models`: session state, snapshots, and wire DTOs
 * - `store`: the keyed in-memory table with per-session atomic updates
 * - `sync`: edit application, push subscriptions, and pull staleness checks
 */

// Re-export main types for easier usage
pub use self::models::{EditRequest, PollRequest, SessionSnapshot, SessionState};
pub use self::store::SessionStore;
pub use self::sync::{PollOutcome, Subscription, Synchronizer};

// Submodules
pub mod models;
pub mod store;
pub mod sync;
