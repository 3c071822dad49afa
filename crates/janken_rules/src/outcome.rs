use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a round, always from the first player's (the human's) side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundOutcome {
    Win,
    Lose,
    Draw,
}

impl RoundOutcome {
    /// The same outcome seen from the other player.
    pub fn invert(self) -> Self {
        match self {
            RoundOutcome::Win => RoundOutcome::Lose,
            RoundOutcome::Lose => RoundOutcome::Win,
            RoundOutcome::Draw => RoundOutcome::Draw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundOutcome::Win => "win",
            RoundOutcome::Lose => "lose",
            RoundOutcome::Draw => "draw",
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
