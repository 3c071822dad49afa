//! Message type definitions for client-server communication.
//!
//! Every frame is a single JSON object tagged by a `type` field.
//!
//! # Example
//!
//! ```json
//! { "type": "PLAY_HAND", "sessionId": "5d0c...", "hand": "rock" }
//! ```

use crate::error::ProtocolError;
use crate::session::{RoundResult, SessionView};
use janken_rules::{Hand, RuleType};
use serde::{Deserialize, Serialize};

/// Message types the server understands.
const KNOWN_TYPES: [&str; 3] = ["CREATE_SESSION", "PLAY_HAND", "LIST_RULES"];

fn default_player_name() -> String {
    "Player".to_string()
}

fn default_rule_type() -> String {
    RuleType::default().as_str().to_string()
}

/// A message sent from a client to the server.
///
/// Hands and rule types stay as raw strings here; checking them against
/// the session's variant is a domain concern, not a decoding one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// Start a session against the NPC
    #[serde(rename_all = "camelCase")]
    CreateSession {
        #[serde(default = "default_player_name")]
        player_name: String,
        #[serde(default = "default_rule_type")]
        rule_type: String,
    },
    /// Play one round of an existing session
    #[serde(rename_all = "camelCase")]
    PlayHand {
        session_id: String,
        hand: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<String>,
    },
    /// Ask for the rule catalogue
    ListRules,
}

impl ClientMessage {
    /// Decodes one inbound text frame.
    ///
    /// # Errors
    ///
    /// * [`ProtocolError::UnknownType`] for a well-formed object whose
    ///   `type` is not recognized
    /// * [`ProtocolError::Malformed`] for anything else that fails to decode
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))?;

        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| ProtocolError::Malformed("missing string field 'type'".to_string()))?;

        if !KNOWN_TYPES.contains(&kind) {
            return Err(ProtocolError::UnknownType(kind.to_string()));
        }

        serde_json::from_value(value).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClientMessage::CreateSession { .. } => "CREATE_SESSION",
            ClientMessage::PlayHand { .. } => "PLAY_HAND",
            ClientMessage::ListRules => "LIST_RULES",
        }
    }
}

/// A message sent from the server to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    SessionCreated { session: SessionView },
    RoundResult(RoundResult),
    Error { message: String },
    Rules { rules: Vec<RuleInfo> },
}

/// Catalogue entry for one rule variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleInfo {
    pub rule_type: RuleType,
    pub name: String,
    pub description: String,
    pub hands: Vec<Hand>,
    pub directional: bool,
}

impl From<RuleType> for RuleInfo {
    fn from(rule: RuleType) -> Self {
        Self {
            rule_type: rule,
            name: rule.name().to_string(),
            description: rule.description().to_string(),
            hands: rule.alphabet().to_vec(),
            directional: rule.is_directional(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Score;
    use janken_rules::RoundOutcome;

    #[test]
    fn test_decode_create_session() {
        let message =
            ClientMessage::decode(r#"{"type":"CREATE_SESSION","playerName":"Alice","ruleType":"ido_janken"}"#)
                .unwrap();
        assert_eq!(
            message,
            ClientMessage::CreateSession {
                player_name: "Alice".to_string(),
                rule_type: "ido_janken".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_create_session_defaults() {
        let message = ClientMessage::decode(r#"{"type":"CREATE_SESSION"}"#).unwrap();
        assert_eq!(
            message,
            ClientMessage::CreateSession {
                player_name: "Player".to_string(),
                rule_type: "classic_rps".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_play_hand() {
        let message = ClientMessage::decode(
            r#"{"type":"PLAY_HAND","sessionId":"abc","hand":"rock","direction":"up"}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            ClientMessage::PlayHand {
                session_id: "abc".to_string(),
                hand: "rock".to_string(),
                direction: Some("up".to_string()),
            }
        );
        assert_eq!(message.kind(), "PLAY_HAND");
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            ClientMessage::decode(r#"{"type":"PLAY_HANDS"}"#),
            Err(ProtocolError::UnknownType(kind)) if kind == "PLAY_HANDS"
        ));
        assert!(matches!(
            ClientMessage::decode("not json"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            ClientMessage::decode(r#"{"hand":"rock"}"#),
            Err(ProtocolError::Malformed(_))
        ));
        // Known type, missing required field
        assert!(matches!(
            ClientMessage::decode(r#"{"type":"PLAY_HAND","hand":"rock"}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn test_round_result_is_flattened() {
        let message = ServerMessage::RoundResult(RoundResult {
            session_id: "abc".to_string(),
            round: 3,
            player_hand: Hand::Rock,
            npc_hand: Hand::Scissors,
            player_direction: None,
            npc_direction: None,
            result: RoundOutcome::Win,
            score: Score { player1: 2, player2: 1 },
        });

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "ROUND_RESULT",
                "session_id": "abc",
                "round": 3,
                "player_hand": "rock",
                "npc_hand": "scissors",
                "result": "win",
                "score": { "player1": 2, "player2": 1 }
            })
        );
    }

    #[test]
    fn test_rule_info_from_rule_type() {
        let info = RuleInfo::from(RuleType::IdoJanken);
        assert_eq!(info.hands.len(), 4);
        assert!(!info.directional);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["ruleType"], "ido_janken");
    }
}
