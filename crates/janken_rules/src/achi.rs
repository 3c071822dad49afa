//! Directional variant ("achi muite hoi").
//!
//! Two phases. The hand-shape phase is classic judging. When it is not a
//! draw, the direction phase decides whether the hand-shape winner keeps
//! the round: the winner is confirmed only if the loser faced the same
//! way, otherwise the roles invert.

use crate::{classic, Direction, RoundOutcome, RuleError, Throw};

pub use crate::classic::HANDS;

/// Hand-shape phase, from `a`'s side.
pub fn judge(a: crate::Hand, b: crate::Hand) -> Result<RoundOutcome, RuleError> {
    classic::judge(a, b)
}

/// Direction phase. `true` confirms the hand-shape winner as round winner.
pub fn judge_direction(winner: Direction, loser: Direction) -> bool {
    winner == loser
}

/// Runs both phases in order and returns the final outcome from `a`'s side.
///
/// # Errors
///
/// * [`RuleError::MissingDirection`] if either throw carries no direction
/// * [`RuleError::InvalidMove`] if either hand is outside the classic alphabet
pub fn resolve(a: Throw, b: Throw) -> Result<RoundOutcome, RuleError> {
    let (a_dir, b_dir) = match (a.direction, b.direction) {
        (Some(a_dir), Some(b_dir)) => (a_dir, b_dir),
        _ => return Err(RuleError::MissingDirection("achi_muite_hoi".to_string())),
    };

    let outcome = match judge(a.hand, b.hand)? {
        RoundOutcome::Draw => RoundOutcome::Draw,
        RoundOutcome::Win if judge_direction(a_dir, b_dir) => RoundOutcome::Win,
        RoundOutcome::Win => RoundOutcome::Lose,
        RoundOutcome::Lose if judge_direction(b_dir, a_dir) => RoundOutcome::Lose,
        RoundOutcome::Lose => RoundOutcome::Win,
    };
    Ok(outcome)
}
