//! # ludo-engine
//!
//! A deterministic match-state engine for four-color Ludo.
//!
//! ## Design Principles
//!
//! 1. **One Command Path**: Humans, bots and the turn timer all submit
//!    `Command`s to the same `TurnController`. Nothing else mutates a match.
//!
//! 2. **States Are Values**: Applying a command borrows the current
//!    `GameState` and returns the next one plus the events it produced.
//!    A rejected command leaves the old state as it was.
//!
//! 3. **Deterministic**: Dice come from an injectable `RandomSource`; a
//!    seeded `GameRng` and the same commands replay the same match.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`, so old
//!   versions are cheap to keep for observers and replays.
//!
//! - **Actor Per Match**: The async runtime serializes commands through one
//!   mailbox and treats a turn timeout as just another command.
//!
//! ## Modules
//!
//! - `core`: Colors, players, tokens, state, events, RNG, configuration
//! - `board`: Grid topology, shared circuit, safe squares
//! - `rules`: Dice, move legality, captures
//! - `turn`: Commands, rejections, the turn state machine
//! - `bot`: Move policies for automated seats
//! - `runtime`: tokio match actor, bot drivers, archiving
//! - `sim`: Synchronous self-play

pub mod core;
pub mod board;
pub mod rules;
pub mod turn;
pub mod bot;
pub mod runtime;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    Color, GameState, MatchConfig, MatchStatus, Player, PlayerId, PlayerSpec, Position, Token,
    TokenId, GameEvent, EventRecord, EventTag, GameRng, RandomSource, SequenceSource,
};

pub use crate::board::{coordinates_for, Cell};

pub use crate::rules::{can_move, CaptureResolver, DiceRoller};

pub use crate::turn::{Command, Rejection, Transition, TurnController};

pub use crate::bot::{GreedyPolicy, MovePolicy};

pub use crate::runtime::{spawn_match, MatchHandle};
