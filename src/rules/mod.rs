//! Stateless rules: dice, move legality, captures.
//!
//! These are synchronous and allocation-light. The turn controller composes
//! them; nothing here knows whose turn it is.

pub mod dice;
pub mod movement;
pub mod capture;

pub use dice::{biased_roll, DiceRoller};
pub use movement::{can_move, destination, legal_moves, LegalMoves};
pub use capture::{Capture, CaptureResolver, Captures};
