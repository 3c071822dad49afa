//! Client connection representation.

use std::net::SocketAddr;
use std::time::SystemTime;
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::tungstenite::Message;

/// Represents an open client connection.
///
/// Outbound frames are pushed onto `sender`; a writer task owned by the
/// connection drains them into the WebSocket sink.
#[derive(Debug)]
pub struct ClientConnection {
    /// Outbound frame queue for this connection
    pub sender: UnboundedSender<Message>,

    /// The remote network address of the client
    pub remote_addr: SocketAddr,

    /// When the handshake was accepted
    pub connected_at: SystemTime,
}

impl ClientConnection {
    pub fn new(sender: UnboundedSender<Message>, remote_addr: SocketAddr) -> Self {
        Self {
            sender,
            remote_addr,
            connected_at: SystemTime::now(),
        }
    }
}
