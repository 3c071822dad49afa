//! Shared server state threaded through connection handling.

use crate::config::ServerConfig;
use crate::connection::ConnectionRegistry;
use crate::messaging::MessageDispatcher;
use crate::npc::{NpcMoveProvider, RandomNpc};
use crate::session::{SessionManager, SessionStore};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};

/// Owns the session store and connection registry for one server process.
///
/// Built once at startup and handed to every connection task; there is no
/// global instance. Also carries the shutdown signal that the accept loop
/// and every connection task listen on, and the pool of connection slots
/// bounded by `max_connections`.
pub struct ServerContext {
    config: ServerConfig,
    sessions: Arc<SessionManager>,
    connections: Arc<ConnectionRegistry>,
    dispatcher: Arc<MessageDispatcher>,
    connection_slots: Arc<Semaphore>,
    shutdown: watch::Sender<bool>,
}

impl ServerContext {
    /// Context with a random NPC opponent.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_npc(config, Arc::new(RandomNpc))
    }

    /// Context with a caller-supplied NPC move provider.
    pub fn with_npc(config: ServerConfig, npc: Arc<dyn NpcMoveProvider>) -> Self {
        let store = Arc::new(SessionStore::new());
        let sessions = Arc::new(SessionManager::new(store, npc, config.npc_names.clone()));
        let connections = Arc::new(ConnectionRegistry::new());
        let dispatcher = Arc::new(MessageDispatcher::new(sessions.clone(), connections.clone()));
        let connection_slots = Arc::new(Semaphore::new(
            config.max_connections.min(Semaphore::MAX_PERMITS),
        ));
        let (shutdown, _) = watch::channel(false);

        Self {
            config,
            sessions,
            connections,
            dispatcher,
            connection_slots,
            shutdown,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    pub fn connections(&self) -> &Arc<ConnectionRegistry> {
        &self.connections
    }

    pub fn dispatcher(&self) -> &Arc<MessageDispatcher> {
        &self.dispatcher
    }

    /// One permit per connection that may be open at once. A permit is taken
    /// when a TCP stream is accepted and released when its task ends.
    pub fn connection_slots(&self) -> &Arc<Semaphore> {
        &self.connection_slots
    }

    /// Receiver that flips to `true` once shutdown begins.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    pub fn signal_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_slots_follow_config() {
        let context = ServerContext::new(ServerConfig::default().with_max_connections(2));
        let first = context.connection_slots().clone().try_acquire_owned();
        let second = context.connection_slots().clone().try_acquire_owned();
        assert!(first.is_ok() && second.is_ok());
        assert!(context.connection_slots().clone().try_acquire_owned().is_err());

        drop(first);
        assert!(context.connection_slots().clone().try_acquire_owned().is_ok());
    }

    #[test]
    fn test_shutdown_signal_reaches_subscribers() {
        let context = ServerContext::new(ServerConfig::default());
        let mut receiver = context.shutdown_signal();
        assert!(!context.is_shutting_down());

        context.signal_shutdown();
        assert!(context.is_shutting_down());
        assert!(receiver.has_changed().unwrap());
        assert!(*receiver.borrow_and_update());
    }
}
