//! # Janken Rules
//!
//! Pure judging for the hand games hosted by the Janken Hub server. No I/O,
//! no shared state: every function maps submitted moves to a
//! [`RoundOutcome`] seen from the first (human) player.
//!
//! ## Variants
//!
//! * **Classic** ([`RuleType::ClassicRps`]) - rock, paper, scissors
//! * **Well** ([`RuleType::IdoJanken`]) - adds a well that swallows rock
//!   and scissors but is covered by paper
//! * **Directional** ([`RuleType::AchiMuiteHoi`]) - classic hand shapes
//!   followed by a direction duel that can invert the winner
//!
//! Judging a full round always goes through [`RuleType::resolve_round`],
//! which runs every phase of the variant in order.

pub mod achi;
pub mod classic;
pub mod ido;

mod error;
mod hand;
mod outcome;
mod rule;

pub use error::RuleError;
pub use hand::{Direction, Hand, Throw};
pub use outcome::RoundOutcome;
pub use rule::RuleType;
