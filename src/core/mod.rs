//! Core match types: colors, players, tokens, state, events, RNG, configuration.
//!
//! Everything here is plain data. Rules live in `rules`, turn sequencing in
//! `turn`.

pub mod color;
pub mod player;
pub mod token;
pub mod rng;
pub mod config;
pub mod event;
pub mod state;

pub use color::Color;
pub use player::{LuckFactor, Player, PlayerId, PlayerSpec};
pub use token::{Position, Regime, Token, TokenId, TOKENS_PER_PLAYER};
pub use rng::{GameRng, RandomSource, SequenceSource};
pub use config::{ConfigError, MatchConfig};
pub use event::{EventRecord, EventTag, ExtraTurnReason, GameEvent, PassReason};
pub use state::{GameState, MatchStatus, TurnDeadline, TurnPhase};
