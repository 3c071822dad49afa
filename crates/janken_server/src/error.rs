//! Error types for the session hub.
//!
//! [`GameError`] covers recoverable domain failures that are reported back
//! to the originating connection as an `ERROR` message. [`ServerError`]
//! covers infrastructure failures (binding, transport, configuration).

use janken_rules::RuleError;
use thiserror::Error;

/// Recoverable failures of a session operation.
///
/// None of these mutate state and none of them close the connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    #[error("Unknown rule type: {0}")]
    UnknownRuleType(String),
}

impl From<RuleError> for GameError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::UnknownRuleType(tag) => GameError::UnknownRuleType(tag),
            RuleError::InvalidMove(hand) => GameError::InvalidMove(hand),
            RuleError::InvalidDirection(direction) => {
                GameError::InvalidMove(format!("unrecognized direction '{direction}'"))
            }
            RuleError::MissingDirection(rule) => {
                GameError::InvalidMove(format!("a direction is required for {rule}"))
            }
        }
    }
}

/// Inbound frames that could not be turned into a [`ClientMessage`].
///
/// Reported to the sender as an `ERROR` message; the connection stays open.
///
/// [`ClientMessage`]: crate::messaging::ClientMessage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Unknown message type: {0}")]
    UnknownType(String),
    #[error("Invalid message: {0}")]
    Malformed(String),
}

/// Server infrastructure errors.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Network-related error (bind failures, handshake or send failures)
    #[error("Network error: {0}")]
    Network(String),
    /// Inbound message could not be decoded
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    /// Invalid server configuration
    #[error("Configuration error: {0}")]
    Config(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_errors_map_to_game_errors() {
        assert_eq!(
            GameError::from(RuleError::UnknownRuleType("x".into())),
            GameError::UnknownRuleType("x".into())
        );
        assert_eq!(
            GameError::from(RuleError::InvalidMove("well".into())),
            GameError::InvalidMove("well".into())
        );
        assert!(matches!(
            GameError::from(RuleError::MissingDirection("achi_muite_hoi".into())),
            GameError::InvalidMove(_)
        ));
    }

    #[test]
    fn test_messages_are_human_readable() {
        let err = GameError::SessionNotFound("abc".into());
        assert_eq!(err.to_string(), "Session not found: abc");

        let err = ProtocolError::UnknownType("PLAY".into());
        assert_eq!(err.to_string(), "Unknown message type: PLAY");

        let err = ServerError::from(ProtocolError::Malformed("eof".into()));
        assert_eq!(err.to_string(), "Protocol error: Invalid message: eof");
    }
}
