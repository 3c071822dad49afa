//! Well-variant ("ido janken").
//!
//! Adds a fourth hand: rock and scissors fall into the well, paper covers
//! it. Well-specific pairs are matched before the classic table so a well
//! never reaches the three-hand comparison.

use crate::{classic, Hand, RoundOutcome, RuleError};

/// Hands legal under the well-variant.
pub const HANDS: [Hand; 4] = [Hand::Rock, Hand::Paper, Hand::Scissors, Hand::Well];

/// Judges a round from `a`'s side.
pub fn judge(a: Hand, b: Hand) -> Result<RoundOutcome, RuleError> {
    let outcome = match (a, b) {
        (Hand::Well, Hand::Well) => RoundOutcome::Draw,
        (Hand::Well, Hand::Rock | Hand::Scissors) => RoundOutcome::Win,
        (Hand::Well, Hand::Paper) => RoundOutcome::Lose,
        (Hand::Rock | Hand::Scissors, Hand::Well) => RoundOutcome::Lose,
        (Hand::Paper, Hand::Well) => RoundOutcome::Win,
        _ => classic::compare(a, b),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_rules() {
        assert_eq!(judge(Hand::Well, Hand::Well), Ok(RoundOutcome::Draw));
        assert_eq!(judge(Hand::Well, Hand::Rock), Ok(RoundOutcome::Win));
        assert_eq!(judge(Hand::Well, Hand::Scissors), Ok(RoundOutcome::Win));
        assert_eq!(judge(Hand::Paper, Hand::Well), Ok(RoundOutcome::Win));
        assert_eq!(judge(Hand::Well, Hand::Paper), Ok(RoundOutcome::Lose));
        assert_eq!(judge(Hand::Rock, Hand::Well), Ok(RoundOutcome::Lose));
    }

    #[test]
    fn test_non_well_pairs_match_classic() {
        for a in classic::HANDS {
            for b in classic::HANDS {
                assert_eq!(judge(a, b), classic::judge(a, b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_total_and_antisymmetric() {
        for a in HANDS {
            for b in HANDS {
                let forward = judge(a, b).unwrap();
                let backward = judge(b, a).unwrap();
                assert_eq!(forward, backward.invert(), "{a} vs {b}");
                if a == b {
                    assert_eq!(forward, RoundOutcome::Draw);
                }
            }
        }
    }
}
