//! Per-actor teleport sessions.
//!
//! A session tracks one actor's prior-position history, outstanding bring
//! grants, and the one-shot ignore latch. The registry hands out sessions
//! lazily, one per actor, for the lifetime of the process.

mod authorizations;
mod errors;
mod history;
mod teleport_session;

// Re-export all public types
pub use authorizations::BringAuthorizations;
pub use errors::TeleportError;
pub use history::LocationHistory;
pub use teleport_session::TeleportSession;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use waystone_domain::{ActorId, HistoryCapacity};

/// A session handle shared between the protocol and event routing.
///
/// The mutex makes all operations on one actor's state appear sequential;
/// cross-actor operations lock two of these in ascending `ActorId` order.
pub type SharedSession = Arc<Mutex<TeleportSession>>;

/// Process-wide map from actor identity to teleport session.
///
/// Constructed once at startup and passed by `Arc` to every collaborator.
/// Entries are created on first lookup and never removed: actor identities
/// are bounded by the concurrently-connected population.
pub struct SessionRegistry {
    sessions: DashMap<ActorId, SharedSession>,
    history_capacity: HistoryCapacity,
}

impl SessionRegistry {
    pub fn new(history_capacity: HistoryCapacity) -> Self {
        Self {
            sessions: DashMap::new(),
            history_capacity,
        }
    }

    /// Returns the existing session for `actor`, or atomically creates and
    /// stores a new empty one. Never fails; exactly one session exists per
    /// distinct actor identity.
    pub fn session(&self, actor: ActorId) -> SharedSession {
        self.sessions
            .entry(actor)
            .or_insert_with(|| {
                tracing::debug!(%actor, "created teleport session");
                Arc::new(Mutex::new(TeleportSession::new(self.history_capacity)))
            })
            .clone()
    }

    /// Number of known sessions, for monitoring.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_is_created_on_first_access() {
        let registry = SessionRegistry::new(HistoryCapacity::default());
        assert_eq!(registry.session_count(), 0);

        let actor = ActorId::new();
        let _session = registry.session(actor);

        assert_eq!(registry.session_count(), 1);
    }

    #[test]
    fn repeated_lookups_return_the_same_session() {
        let registry = SessionRegistry::new(HistoryCapacity::default());
        let actor = ActorId::new();

        let first = registry.session(actor);
        let second = registry.session(actor);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.session_count(), 1);
    }

    #[test]
    fn distinct_actors_get_distinct_sessions() {
        let registry = SessionRegistry::new(HistoryCapacity::default());

        let first = registry.session(ActorId::new());
        let second = registry.session(ActorId::new());

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(registry.session_count(), 2);
    }
}
