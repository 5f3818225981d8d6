//! Observable match events.
//!
//! Every accepted command appends zero or more [`EventRecord`]s to the match
//! log. Renderers, audio and settlement layers read these; nothing they do
//! feeds back into the engine.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::player::PlayerId;
use super::token::{Position, TokenId};

/// Coarse event category, one per consumer-facing cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTag {
    DiceRolled,
    TokenMoved,
    TokenCaptured,
    ExtraTurnGranted,
    TurnPassed,
    PlayerWon,
    MatchFinished,
}

/// Why the turn moved to another player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassReason {
    /// The roll left no token able to move.
    NoLegalMove,
    /// A normal move without six or capture.
    MoveCompleted,
    /// The six limit was hit.
    ConsecutiveSixes,
    /// The mover finished their last token.
    PlayerFinished,
    /// The turn deadline elapsed.
    TimedOut,
}

/// Why the same player keeps the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtraTurnReason {
    RolledSix,
    Captured,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted {
        players: Vec<(PlayerId, Color)>,
    },
    DiceRolled {
        player: PlayerId,
        value: u8,
    },
    TokenMoved {
        player: PlayerId,
        token: TokenId,
        from: Position,
        to: Position,
    },
    TokenCaptured {
        by: PlayerId,
        victim: PlayerId,
        token: TokenId,
        from: Position,
    },
    ExtraTurnGranted {
        player: PlayerId,
        reason: ExtraTurnReason,
    },
    TurnPassed {
        from: PlayerId,
        to: PlayerId,
        reason: PassReason,
    },
    PlayerWon {
        player: PlayerId,
        place: usize,
    },
    MatchFinished {
        standings: Vec<PlayerId>,
    },
}

impl GameEvent {
    /// Consumer-facing tag. `MatchStarted` has no cue of its own and reports
    /// `None`.
    #[must_use]
    pub fn tag(&self) -> Option<EventTag> {
        match self {
            GameEvent::MatchStarted { .. } => None,
            GameEvent::DiceRolled { .. } => Some(EventTag::DiceRolled),
            GameEvent::TokenMoved { .. } => Some(EventTag::TokenMoved),
            GameEvent::TokenCaptured { .. } => Some(EventTag::TokenCaptured),
            GameEvent::ExtraTurnGranted { .. } => Some(EventTag::ExtraTurnGranted),
            GameEvent::TurnPassed { .. } => Some(EventTag::TurnPassed),
            GameEvent::PlayerWon { .. } => Some(EventTag::PlayerWon),
            GameEvent::MatchFinished { .. } => Some(EventTag::MatchFinished),
        }
    }
}

/// Logged event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the match log, starting at 0.
    pub sequence: u64,
    /// Turn counter at the time the event happened.
    pub turn: u32,
    pub event: GameEvent,
}
