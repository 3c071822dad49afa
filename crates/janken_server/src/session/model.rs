//! Session data model.
//!
//! A [`Session`] pairs the initiating human (slot 1) with an automated
//! opponent (slot 2) under one rule variant. Moves live in a per-player
//! pending slot that is filled on submission and emptied when the round is
//! settled, so nothing carries over between rounds.

use crate::connection::ConnectionId;
use chrono::{DateTime, Utc};
use janken_rules::{Direction, Hand, RoundOutcome, RuleError, RuleType, Throw};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// One participant of a session.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub is_npc: bool,
    pending: Option<Throw>,
}

impl Player {
    /// The human occupying slot 1, identified by its connection.
    pub fn human(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_npc: false,
            pending: None,
        }
    }

    /// A freshly generated automated opponent.
    pub fn npc(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_npc: true,
            pending: None,
        }
    }

    /// Stores this round's move, replacing any unsettled one.
    pub fn submit(&mut self, throw: Throw) {
        self.pending = Some(throw);
    }

    /// Removes and returns this round's move.
    pub fn take_pending(&mut self) -> Option<Throw> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Public fields only. The pending move is never exposed.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            id: self.id.clone(),
            name: self.name.clone(),
            is_npc: self.is_npc,
        }
    }
}

/// Wire view of a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    #[serde(rename = "isNPC")]
    pub is_npc: bool,
}

/// Running score keyed by player slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    /// Credits the round winner. Draws credit nobody.
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win => self.player1 += 1,
            RoundOutcome::Lose => self.player2 += 1,
            RoundOutcome::Draw => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.player1 + self.player2
    }
}

/// A settled round as stored on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: u32,
    pub human: Throw,
    pub npc: Throw,
    pub outcome: RoundOutcome,
}

/// The state of one match between a human and the NPC.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub rule_type: RuleType,
    pub player1: Player,
    pub player2: Player,
    pub current_round: u32,
    pub score: Score,
    pub last_round: Option<RoundRecord>,
    pub created_at: DateTime<Utc>,
    pub owner: ConnectionId,
}

impl Session {
    pub fn new(owner: ConnectionId, human: Player, npc: Player, rule_type: RuleType) -> Self {
        Self {
            id: SessionId::new(),
            rule_type,
            player1: human,
            player2: npc,
            current_round: 0,
            score: Score::default(),
            last_round: None,
            created_at: Utc::now(),
            owner,
        }
    }

    /// The outcome of the most recent round, if any round has completed.
    pub fn result(&self) -> Option<RoundOutcome> {
        self.last_round.map(|round| round.outcome)
    }

    /// Settles the round from both players' pending moves.
    ///
    /// Both pending slots are empty afterwards, whether or not the round
    /// could be judged. On error the round counter, score and last round are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidMove`] if either player has no pending move, or
    /// whatever the session's variant rejects.
    pub fn settle_round(&mut self) -> Result<RoundRecord, RuleError> {
        let human = self.player1.take_pending();
        let npc = self.player2.take_pending();
        let (Some(human), Some(npc)) = (human, npc) else {
            return Err(RuleError::InvalidMove(
                "round settled before both moves were submitted".to_string(),
            ));
        };

        let outcome = self.rule_type.resolve_round(human, npc)?;

        self.current_round += 1;
        self.score.record(outcome);
        let record = RoundRecord {
            round: self.current_round,
            human,
            npc,
            outcome,
        };
        self.last_round = Some(record);
        Ok(record)
    }

    /// Wire view used by `SESSION_CREATED`.
    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id.to_string(),
            rule_type: self.rule_type,
            player1: self.player1.view(),
            player2: self.player2.view(),
            score: self.score,
            current_round: self.current_round,
            created_at: self.created_at,
        }
    }
}

/// Public snapshot of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub rule_type: RuleType,
    pub player1: PlayerView,
    pub player2: PlayerView,
    pub score: Score,
    pub current_round: u32,
    pub created_at: DateTime<Utc>,
}

/// Outcome of `playRound` as sent in `ROUND_RESULT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub session_id: String,
    pub round: u32,
    pub player_hand: Hand,
    pub npc_hand: Hand,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npc_direction: Option<Direction>,
    pub result: RoundOutcome,
    pub score: Score,
}

impl RoundResult {
    pub fn new(session: &Session, record: &RoundRecord) -> Self {
        Self {
            session_id: session.id.to_string(),
            round: record.round,
            player_hand: record.human.hand,
            npc_hand: record.npc.hand,
            player_direction: record.human.direction,
            npc_direction: record.npc.direction,
            result: record.outcome,
            score: session.score,
        }
    }
}
