//! Error types for round judging.

use thiserror::Error;

/// Errors raised while parsing moves or judging a round.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The move is not part of the variant's alphabet (or not a move at all)
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    /// The direction string is not one of up/down/left/right
    #[error("Invalid direction: {0}")]
    InvalidDirection(String),
    /// A directional variant was judged without a direction for one side
    #[error("Direction required for rule type: {0}")]
    MissingDirection(String),
    /// The rule-type tag does not name a registered variant
    #[error("Unknown rule type: {0}")]
    UnknownRuleType(String),
}
