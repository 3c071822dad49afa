//! Routing of decoded client messages to the session manager.

use super::{ClientMessage, RuleInfo, ServerMessage};
use crate::connection::{ConnectionId, ConnectionRegistry};
use crate::error::{GameError, ServerError};
use crate::session::SessionManager;
use janken_rules::RuleType;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns inbound frames into replies for the originating connection.
///
/// Every inbound frame produces exactly one reply. Domain failures and
/// undecodable frames become `ERROR` replies and never close the
/// connection.
pub struct MessageDispatcher {
    sessions: Arc<SessionManager>,
    connections: Arc<ConnectionRegistry>,
}

impl MessageDispatcher {
    pub fn new(sessions: Arc<SessionManager>, connections: Arc<ConnectionRegistry>) -> Self {
        Self {
            sessions,
            connections,
        }
    }

    /// Processes one text frame from `connection_id` and queues the reply.
    ///
    /// # Errors
    ///
    /// Only transport failures while queueing the reply are returned.
    pub fn handle_message(&self, connection_id: ConnectionId, text: &str) -> Result<(), ServerError> {
        let reply = self.dispatch(connection_id, text);
        self.connections.send_message(connection_id, &reply)
    }

    /// Computes the reply to one text frame without sending it.
    pub fn dispatch(&self, connection_id: ConnectionId, text: &str) -> ServerMessage {
        let message = match ClientMessage::decode(text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Rejected frame from {}: {}", connection_id, e);
                return ServerMessage::Error { message: e.to_string() };
            }
        };

        debug!("📨 {} from connection {}", message.kind(), connection_id);

        let reply = match message {
            ClientMessage::CreateSession {
                player_name,
                rule_type,
            } => self
                .sessions
                .create_session(connection_id, &player_name, &rule_type)
                .map(|session| ServerMessage::SessionCreated { session: session.view() }),
            ClientMessage::PlayHand {
                session_id,
                hand,
                direction,
            } => self
                .sessions
                .play_round(connection_id, &session_id, &hand, direction.as_deref())
                .map(ServerMessage::RoundResult),
            ClientMessage::ListRules => Ok(ServerMessage::Rules {
                rules: RuleType::ALL.into_iter().map(RuleInfo::from).collect(),
            }),
        };

        reply.unwrap_or_else(|e: GameError| {
            debug!("Request from {} failed: {}", connection_id, e);
            ServerMessage::Error { message: e.to_string() }
        })
    }
}
