//! Commands accepted by the turn controller, and what applying one yields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{EventRecord, GameState, MatchStatus, PlayerId, PlayerSpec, TokenId};

/// Every way to drive a match. Humans, bots and the turn timer all go
/// through these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    StartMatch { players: Vec<PlayerSpec> },
    RollDice { player: PlayerId },
    MoveToken { player: PlayerId, token: TokenId },
    /// The countdown for deadline `generation` ran out.
    TimeElapsed { generation: u64 },
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::StartMatch { .. } => "start_match",
            Command::RollDice { .. } => "roll_dice",
            Command::MoveToken { .. } => "move_token",
            Command::TimeElapsed { .. } => "time_elapsed",
        }
    }
}

/// Stable reason codes for surfacing rejections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionCode {
    NotYourTurn,
    RollAlreadyPending,
    NoRollPending,
    IllegalMove,
    MatchNotPlaying,
    MatchAlreadyStarted,
    InvalidRoster,
    StaleTimeout,
}

/// A command that was refused. The state it was applied to is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{player} acted but it is {current}'s turn")]
    NotYourTurn { player: PlayerId, current: PlayerId },

    #[error("dice already rolled; a move is pending")]
    RollAlreadyPending,

    #[error("no dice value; roll first")]
    NoRollPending,

    #[error("{player} cannot move {token}")]
    IllegalMove { player: PlayerId, token: TokenId },

    #[error("match is {status}")]
    MatchNotPlaying { status: MatchStatus },

    #[error("match already started")]
    MatchAlreadyStarted,

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("stale timeout for deadline {got}, current is {expected}")]
    StaleTimeout { expected: u64, got: u64 },
}

impl Rejection {
    #[must_use]
    pub fn code(&self) -> RejectionCode {
        match self {
            Rejection::NotYourTurn { .. } => RejectionCode::NotYourTurn,
            Rejection::RollAlreadyPending => RejectionCode::RollAlreadyPending,
            Rejection::NoRollPending => RejectionCode::NoRollPending,
            Rejection::IllegalMove { .. } => RejectionCode::IllegalMove,
            Rejection::MatchNotPlaying { .. } => RejectionCode::MatchNotPlaying,
            Rejection::MatchAlreadyStarted => RejectionCode::MatchAlreadyStarted,
            Rejection::InvalidRoster(_) => RejectionCode::InvalidRoster,
            Rejection::StaleTimeout { .. } => RejectionCode::StaleTimeout,
        }
    }
}

/// Result of an accepted command: the next state and the events it logged.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: GameState,
    /// Records appended by this command, in order. Also present at the tail
    /// of `state.event_log()`.
    pub events: Vec<EventRecord>,
}
