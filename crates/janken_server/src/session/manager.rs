//! Session orchestration: creation and round execution.

use super::{Player, RoundResult, Session, SessionId, SessionStore};
use crate::connection::ConnectionId;
use crate::error::GameError;
use crate::npc::NpcMoveProvider;
use janken_rules::{Direction, RuleError, RuleType, Throw};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fallback NPC name when the configured pool is empty.
const DEFAULT_NPC_NAME: &str = "NPC";

/// Creates sessions and plays rounds against the NPC.
///
/// The manager validates input, asks the [`NpcMoveProvider`] for the
/// opponent's move, judges through the session's [`RuleType`] and updates
/// the stored session. Failed operations never mutate the store.
pub struct SessionManager {
    store: Arc<SessionStore>,
    npc: Arc<dyn NpcMoveProvider>,
    npc_names: Vec<String>,
}

impl SessionManager {
    /// Creates a new session manager.
    ///
    /// # Arguments
    ///
    /// * `store` - Shared session storage
    /// * `npc` - Move provider for the automated opponent
    /// * `npc_names` - Pool of display names drawn for new opponents
    pub fn new(store: Arc<SessionStore>, npc: Arc<dyn NpcMoveProvider>, npc_names: Vec<String>) -> Self {
        Self {
            store,
            npc,
            npc_names,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Starts a session between the human on `owner` and a fresh NPC.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownRuleType`] when `rule_type` is not registered.
    /// Nothing is stored in that case.
    pub fn create_session(
        &self,
        owner: ConnectionId,
        human_name: &str,
        rule_type: &str,
    ) -> Result<Session, GameError> {
        let rule_type: RuleType = rule_type.parse()?;

        let human = Player::human(owner.to_string(), human_name);
        let npc = Player::npc(self.pick_npc_name());
        let session = Session::new(owner, human, npc, rule_type);

        self.store.insert(session.clone());
        info!(
            "Created game session {} ({}) for connection {}: {} vs {}",
            session.id, rule_type, owner, session.player1.name, session.player2.name
        );

        Ok(session)
    }

    /// Plays one round of `session_id` with the human's `hand`.
    ///
    /// Only the connection that created the session may play it. `direction`
    /// is required by the directional variant and ignored by the others.
    ///
    /// # Errors
    ///
    /// * [`GameError::SessionNotFound`] if the id is unknown (or not an id),
    ///   or the session belongs to another connection
    /// * [`GameError::InvalidMove`] if the hand or direction is not legal for
    ///   the session's variant
    pub fn play_round(
        &self,
        player: ConnectionId,
        session_id: &str,
        hand: &str,
        direction: Option<&str>,
    ) -> Result<RoundResult, GameError> {
        let not_found = || GameError::SessionNotFound(session_id.to_string());
        let id: SessionId = session_id.parse().map_err(|_| not_found())?;

        let result = self
            .store
            .with_session_mut(&id, |session| {
                if session.owner != player {
                    warn!("Connection {} tried to play session {} it does not own", player, id);
                    return Err(not_found());
                }
                self.settle_round(session, hand, direction)
            })
            .ok_or_else(not_found)??;

        debug!(
            "Session {} round {}: {} vs {} -> {}",
            result.session_id, result.round, result.player_hand, result.npc_hand, result.result
        );
        Ok(result)
    }

    /// Looks up a session without touching it.
    pub fn get_session(&self, session_id: &str) -> Option<Session> {
        let id: SessionId = session_id.parse().ok()?;
        self.store.get(&id)
    }

    /// Drops all sessions owned by a closed connection.
    pub fn end_sessions_for(&self, owner: ConnectionId) -> usize {
        let removed = self.store.remove_owned_by(owner);
        if removed > 0 {
            info!("Evicted {} session(s) of closed connection {}", removed, owner);
        }
        removed
    }

    fn settle_round(
        &self,
        session: &mut Session,
        hand: &str,
        direction: Option<&str>,
    ) -> Result<RoundResult, GameError> {
        let rule = session.rule_type;
        let human_hand = rule.parse_hand(hand)?;

        let (human_direction, npc_direction) = if rule.is_directional() {
            let direction = direction
                .ok_or_else(|| RuleError::MissingDirection(rule.to_string()))?
                .parse::<Direction>()?;
            (Some(direction), Some(self.npc.choose_direction()))
        } else {
            (None, None)
        };

        session.player1.submit(Throw::new(human_hand, human_direction));
        session
            .player2
            .submit(Throw::new(self.npc.choose_hand(rule), npc_direction));

        let record = session.settle_round()?;
        Ok(RoundResult::new(session, &record))
    }

    fn pick_npc_name(&self) -> String {
        self.npc_names
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_NPC_NAME.to_string())
    }
}
