//! Registry of open connections.

use super::{ClientConnection, ConnectionId};
use crate::error::ServerError;
use crate::messaging::ServerMessage;
use dashmap::DashMap;
use std::net::SocketAddr;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info};

/// Maps connection ids to their live handles.
///
/// A connection is present exactly while it is `Open`. Sends addressed to
/// an id that is not registered are dropped.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ClientConnection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Registers a connection whose handshake was just accepted.
    ///
    /// # Returns
    ///
    /// The freshly generated connection id and the receiving end of its
    /// outbound queue, to be drained by the connection's writer task.
    pub fn register(&self, remote_addr: SocketAddr) -> (ConnectionId, UnboundedReceiver<Message>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::new();

        self.connections
            .insert(connection_id, ClientConnection::new(sender, remote_addr));
        info!(
            "Client connected: {} from {}. Total: {}",
            connection_id,
            remote_addr,
            self.connections.len()
        );

        (connection_id, receiver)
    }

    /// Removes a connection. Dropping its handle closes the outbound queue,
    /// which stops the writer task.
    pub fn deregister(&self, connection_id: ConnectionId) -> bool {
        let removed = self.connections.remove(&connection_id).is_some();
        if removed {
            info!(
                "Client disconnected: {}. Total: {}",
                connection_id,
                self.connections.len()
            );
        }
        removed
    }

    pub fn is_open(&self, connection_id: ConnectionId) -> bool {
        self.connections.contains_key(&connection_id)
    }

    pub fn remote_addr(&self, connection_id: ConnectionId) -> Option<SocketAddr> {
        self.connections
            .get(&connection_id)
            .map(|connection| connection.remote_addr)
    }

    /// Encodes `message` as JSON and queues it for `connection_id`.
    ///
    /// # Errors
    ///
    /// `ServerError::Internal` if encoding fails, `ServerError::Network` if
    /// the connection's writer has already gone away.
    pub fn send_message(&self, connection_id: ConnectionId, message: &ServerMessage) -> Result<(), ServerError> {
        let text = serde_json::to_string(message)
            .map_err(|e| ServerError::Internal(format!("Failed to encode message: {e}")))?;
        self.send_raw(connection_id, Message::text(text))
    }

    /// Queues a raw frame for `connection_id`.
    pub fn send_raw(&self, connection_id: ConnectionId, frame: Message) -> Result<(), ServerError> {
        let Some(connection) = self.connections.get(&connection_id) else {
            debug!("Dropping frame for closed connection {}", connection_id);
            return Ok(());
        };

        connection
            .sender
            .send(frame)
            .map_err(|e| ServerError::Network(format!("Failed to queue message for {connection_id}: {e}")))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Asks every connection to close and forgets all of them.
    pub fn shutdown_all(&self) {
        for entry in self.connections.iter() {
            let _ = entry.value().sender.send(Message::Close(None));
        }
        self.connections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 40000))
    }

    #[tokio::test]
    async fn test_register_and_send() {
        let registry = ConnectionRegistry::new();
        let (id, mut outbound) = registry.register(addr());

        assert!(registry.is_open(id));
        assert_eq!(registry.remote_addr(id), Some(addr()));

        registry
            .send_message(id, &ServerMessage::Error { message: "boom".into() })
            .unwrap();

        match outbound.recv().await {
            Some(Message::Text(text)) => {
                let json: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
                assert_eq!(json["type"], "ERROR");
                assert_eq!(json["message"], "boom");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deregister_closes_queue_and_drops_sends() {
        let registry = ConnectionRegistry::new();
        let (id, mut outbound) = registry.register(addr());

        assert!(registry.deregister(id));
        assert!(!registry.deregister(id));
        assert_eq!(registry.connection_count(), 0);

        // Closed connections swallow sends
        assert!(registry
            .send_message(id, &ServerMessage::Error { message: "late".into() })
            .is_ok());
        assert!(outbound.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_shutdown_all_sends_close() {
        let registry = ConnectionRegistry::new();
        let (_, mut first) = registry.register(addr());
        let (_, mut second) = registry.register(addr());

        registry.shutdown_all();

        assert!(matches!(first.recv().await, Some(Message::Close(None))));
        assert!(matches!(second.recv().await, Some(Message::Close(None))));
        assert_eq!(registry.connection_count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = ConnectionRegistry::new();
        let (a, _ra) = registry.register(addr());
        let (b, _rb) = registry.register(addr());
        assert_ne!(a, b);
        assert_eq!(registry.connection_count(), 2);
    }
}
