//! Classic rock-paper-scissors.
//!
//! Rock beats scissors, scissors beats paper, paper beats rock. The
//! directional variant reuses this table for its hand-shape phase and the
//! well-variant falls back to it for every pair without a well.

use crate::{Hand, RoundOutcome, RuleError};

/// Hands legal under classic rules.
pub const HANDS: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

/// Returns true when `a` beats `b` in the three-hand table.
pub fn beats(a: Hand, b: Hand) -> bool {
    matches!(
        (a, b),
        (Hand::Rock, Hand::Scissors) | (Hand::Scissors, Hand::Paper) | (Hand::Paper, Hand::Rock)
    )
}

/// Judges a round from `a`'s side.
///
/// # Errors
///
/// Returns [`RuleError::InvalidMove`] if either hand is a well.
pub fn judge(a: Hand, b: Hand) -> Result<RoundOutcome, RuleError> {
    ensure_legal(a)?;
    ensure_legal(b)?;
    Ok(compare(a, b))
}

/// Three-hand comparison without alphabet checks. Callers must have
/// rejected wells already.
pub(crate) fn compare(a: Hand, b: Hand) -> RoundOutcome {
    if a == b {
        RoundOutcome::Draw
    } else if beats(a, b) {
        RoundOutcome::Win
    } else {
        RoundOutcome::Lose
    }
}

fn ensure_legal(hand: Hand) -> Result<(), RuleError> {
    if HANDS.contains(&hand) {
        Ok(())
    } else {
        Err(RuleError::InvalidMove(hand.to_string()))
    }
}
