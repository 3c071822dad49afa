//! Rule-variant catalogue and dispatch.

use crate::{achi, classic, ido, Direction, Hand, RoundOutcome, RuleError, Throw};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registered rule variant, selected once per session.
///
/// The set is closed: every variant is a case of this enum and judging
/// dispatches on it directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Classic rock-paper-scissors
    #[default]
    ClassicRps,
    /// Well-variant
    IdoJanken,
    /// Directional two-phase variant
    AchiMuiteHoi,
}

impl RuleType {
    /// Every registered variant.
    pub const ALL: [RuleType; 3] = [RuleType::ClassicRps, RuleType::IdoJanken, RuleType::AchiMuiteHoi];

    /// Wire tag of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::ClassicRps => "classic_rps",
            RuleType::IdoJanken => "ido_janken",
            RuleType::AchiMuiteHoi => "achi_muite_hoi",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            RuleType::ClassicRps => "Classic Rock-Paper-Scissors",
            RuleType::IdoJanken => "Ido Janken (井戸じゃんけん)",
            RuleType::AchiMuiteHoi => "Achi Muite Hoi (あっちむいてホイ)",
        }
    }

    /// One-line rule summary for display.
    pub fn description(&self) -> &'static str {
        match self {
            RuleType::ClassicRps => "Rock beats Scissors, Scissors beats Paper, Paper beats Rock",
            RuleType::IdoJanken => "Rock/Scissors fall into Well, Paper covers Well",
            RuleType::AchiMuiteHoi => {
                "Rock-Paper-Scissors + Direction Game. Winner chooses direction, if loser looks the same way, winner wins!"
            }
        }
    }

    /// Hands legal under this variant.
    pub fn alphabet(&self) -> &'static [Hand] {
        match self {
            RuleType::ClassicRps => &classic::HANDS,
            RuleType::IdoJanken => &ido::HANDS,
            RuleType::AchiMuiteHoi => &achi::HANDS,
        }
    }

    /// Whether rounds under this variant need a direction from both sides.
    pub fn is_directional(&self) -> bool {
        matches!(self, RuleType::AchiMuiteHoi)
    }

    /// Parses a wire hand and checks it against this variant's alphabet.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidMove`] when the string is not a hand or the hand
    /// is not legal here.
    pub fn parse_hand(&self, hand: &str) -> Result<Hand, RuleError> {
        let parsed = hand.parse::<Hand>()?;
        if self.alphabet().contains(&parsed) {
            Ok(parsed)
        } else {
            Err(RuleError::InvalidMove(hand.to_string()))
        }
    }

    /// Hand-shape judgment from `a`'s side.
    ///
    /// For the directional variant this answers only the hand-shape phase;
    /// use [`RuleType::resolve_round`] to settle a full round.
    pub fn judge(&self, a: Hand, b: Hand) -> Result<RoundOutcome, RuleError> {
        match self {
            RuleType::ClassicRps => classic::judge(a, b),
            RuleType::IdoJanken => ido::judge(a, b),
            RuleType::AchiMuiteHoi => achi::judge(a, b),
        }
    }

    /// Direction phase. `Some(true)` confirms the hand-shape winner;
    /// `None` for variants without a direction phase.
    pub fn judge_direction(&self, winner: Direction, loser: Direction) -> Option<bool> {
        match self {
            RuleType::AchiMuiteHoi => Some(achi::judge_direction(winner, loser)),
            RuleType::ClassicRps | RuleType::IdoJanken => None,
        }
    }

    /// Settles a full round from `human`'s side, running every phase the
    /// variant has. Directions are ignored by non-directional variants.
    pub fn resolve_round(&self, human: Throw, npc: Throw) -> Result<RoundOutcome, RuleError> {
        match self {
            RuleType::AchiMuiteHoi => achi::resolve(human, npc),
            _ => self.judge(human.hand, npc.hand),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleType::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| RuleError::UnknownRuleType(s.to_string()))
    }
}
