//! # Janken Hub Server
//!
//! Real-time hub for two-player hand games against an automated opponent.
//! Clients hold a WebSocket open, start a session under one of the rule
//! variants from [`janken_rules`], submit moves and receive each round's
//! result together with the running score.
//!
//! ## Message Flow
//!
//! 1. A client sends a JSON frame tagged by `type`
//! 2. The [`MessageDispatcher`] decodes it and calls the [`SessionManager`]
//! 3. The manager asks the [`NpcMoveProvider`] for the opponent's move and
//!    judges the round through the session's [`RuleType`]
//! 4. The reply is queued on the originating connection only
//!
//! ## Protocol
//!
//! | inbound | outbound |
//! |---|---|
//! | `CREATE_SESSION` {playerName, ruleType} | `SESSION_CREATED` {session} |
//! | `PLAY_HAND` {sessionId, hand, direction?} | `ROUND_RESULT` {session_id, round, player_hand, npc_hand, result, score} |
//! | `LIST_RULES` | `RULES` {rules} |
//!
//! Any failure is answered with `ERROR` {message}; the connection stays
//! open.
//!
//! ## Thread Safety
//!
//! Sessions and connections live in `DashMap`s owned by a
//! [`ServerContext`]. Each connection's frames are handled one at a time by
//! that connection's task; different connections proceed concurrently.
//!
//! [`RuleType`]: janken_rules::RuleType

pub use config::ServerConfig;
pub use connection::{ConnectionId, ConnectionRegistry, ConnectionState};
pub use context::ServerContext;
pub use error::{GameError, ProtocolError, ServerError};
pub use messaging::{ClientMessage, MessageDispatcher, RuleInfo, ServerMessage};
pub use npc::{NpcMoveProvider, RandomNpc, ScriptedNpc};
pub use server::GameServer;
pub use session::{RoundResult, Session, SessionId, SessionManager, SessionStore};

pub mod config;
pub mod connection;
pub mod context;
pub mod error;
pub mod messaging;
pub mod npc;
pub mod server;
pub mod session;

/// Creates a server with the default configuration.
pub fn create_server() -> GameServer {
    GameServer::new(ServerConfig::default())
}

/// Creates a server with a custom configuration.
pub fn create_server_with_config(config: ServerConfig) -> GameServer {
    GameServer::new(config)
}
