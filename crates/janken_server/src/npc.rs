//! Move selection for the automated opponent.

use janken_rules::{Direction, Hand, RuleType};
use rand::seq::SliceRandom;

/// Supplies the NPC's moves for a round.
///
/// Implementations must only return hands from the rule's alphabet.
pub trait NpcMoveProvider: Send + Sync {
    /// Picks a hand legal under `rule`.
    fn choose_hand(&self, rule: RuleType) -> Hand;

    /// Picks a direction for the directional variant.
    fn choose_direction(&self) -> Direction;
}

/// Uniformly random opponent.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNpc;

impl NpcMoveProvider for RandomNpc {
    fn choose_hand(&self, rule: RuleType) -> Hand {
        let mut rng = rand::thread_rng();
        rule.alphabet()
            .choose(&mut rng)
            .copied()
            .unwrap_or(Hand::Rock)
    }

    fn choose_direction(&self) -> Direction {
        let mut rng = rand::thread_rng();
        Direction::ALL
            .choose(&mut rng)
            .copied()
            .unwrap_or(Direction::Up)
    }
}

/// Opponent that always throws the same hand and direction.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedNpc {
    pub hand: Hand,
    pub direction: Direction,
}

impl ScriptedNpc {
    pub fn new(hand: Hand, direction: Direction) -> Self {
        Self { hand, direction }
    }

    /// Scripted hand; direction defaults to up.
    pub fn hand(hand: Hand) -> Self {
        Self::new(hand, Direction::Up)
    }
}

impl NpcMoveProvider for ScriptedNpc {
    fn choose_hand(&self, _rule: RuleType) -> Hand {
        self.hand
    }

    fn choose_direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_npc_stays_in_alphabet() {
        let npc = RandomNpc;
        for rule in RuleType::ALL {
            for _ in 0..200 {
                assert!(rule.alphabet().contains(&npc.choose_hand(rule)));
            }
        }
    }

    #[test]
    fn test_random_npc_can_throw_well_only_in_ido() {
        let npc = RandomNpc;
        let wells = (0..400)
            .filter(|_| npc.choose_hand(RuleType::IdoJanken) == Hand::Well)
            .count();
        assert!(wells > 0);
        assert!((0..400).all(|_| npc.choose_hand(RuleType::ClassicRps) != Hand::Well));
    }

    #[test]
    fn test_scripted_npc() {
        let npc = ScriptedNpc::new(Hand::Well, Direction::Left);
        assert_eq!(npc.choose_hand(RuleType::IdoJanken), Hand::Well);
        assert_eq!(npc.choose_direction(), Direction::Left);
    }
}
