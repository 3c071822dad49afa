//! In-memory session storage.

use super::{Session, SessionId};
use crate::connection::ConnectionId;
use dashmap::DashMap;
use tracing::debug;

/// Concurrent map from session id to session state.
///
/// Insert, lookup and removal are safe from independent connection tasks.
/// Mutation goes through [`SessionStore::with_session_mut`], which holds the
/// entry's shard lock only for the duration of the closure.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Registers a session under its own id.
    pub fn insert(&self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    /// Returns a snapshot of the session.
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    /// Runs `f` against the stored session, if present.
    pub fn with_session_mut<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.sessions.get_mut(id).map(|mut entry| f(entry.value_mut()))
    }

    pub fn remove(&self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id).map(|(_, session)| session)
    }

    /// Drops every session created by `owner`. Returns how many were removed.
    pub fn remove_owned_by(&self, owner: ConnectionId) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, session| {
            if session.owner == owner {
                removed += 1;
                false
            } else {
                true
            }
        });
        debug!("Removed {} session(s) owned by connection {}", removed, owner);
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn clear(&self) {
        self.sessions.clear();
    }
}
