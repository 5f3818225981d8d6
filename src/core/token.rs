//! Tokens and their linear positions.
//!
//! ## Position regimes
//!
//! A token's position is a single integer relative to its owner:
//!
//! | Value    | Regime                                   |
//! |----------|------------------------------------------|
//! | `-1`     | In base, not yet entered                 |
//! | `0..=50` | On the shared track, from the entry cell |
//! | `51..=56`| On the owner's private home stretch      |
//! | `57`     | Finished                                 |

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Number of tokens each player owns.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Token identifier within a player's set (0..=3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl TokenId {
    /// Create a token ID, or `None` if it is out of range.
    #[must_use]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < TOKENS_PER_PLAYER {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Raw index into a player's token array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every token ID in ascending order.
    pub fn all() -> impl Iterator<Item = TokenId> {
        (0..TOKENS_PER_PLAYER as u8).map(TokenId)
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {}", self.0)
    }
}

/// Classification of a [`Position`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    Base,
    /// Relative step along the shared track (0..=50).
    Track(u8),
    /// Step within the home stretch (0..=5).
    HomeStretch(u8),
    Finished,
}

/// Linear position of a token, always within `-1..=57`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Position(i8);

impl Position {
    pub const BASE: Position = Position(-1);
    pub const ENTRY: Position = Position(0);
    pub const HOME_STRETCH_START: Position = Position(51);
    pub const FINISHED: Position = Position(57);

    /// Create a position, or `None` outside `-1..=57`.
    #[must_use]
    pub const fn new(value: i8) -> Option<Self> {
        if value >= Self::BASE.0 && value <= Self::FINISHED.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> i8 {
        self.0
    }

    #[must_use]
    pub const fn regime(self) -> Regime {
        match self.0 {
            -1 => Regime::Base,
            57 => Regime::Finished,
            v if v >= Self::HOME_STRETCH_START.0 => {
                Regime::HomeStretch((v - Self::HOME_STRETCH_START.0) as u8)
            }
            v => Regime::Track(v as u8),
        }
    }

    #[must_use]
    pub const fn is_base(self) -> bool {
        self.0 == Self::BASE.0
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        self.0 == Self::FINISHED.0
    }

    #[must_use]
    pub const fn on_track(self) -> bool {
        self.0 >= 0 && self.0 < Self::HOME_STRETCH_START.0
    }

    /// Advance by `steps`, or `None` if that would overshoot the finish.
    #[must_use]
    pub fn advanced_by(self, steps: u8) -> Option<Self> {
        let steps = i8::try_from(steps).ok()?;
        Self::new(self.0.checked_add(steps)?)
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Position::new(value).ok_or_else(|| format!("position {value} outside -1..=57"))
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single token on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub owner: Color,
    pub position: Position,
}

impl Token {
    /// A token waiting in its owner's base.
    #[must_use]
    pub const fn in_base(id: TokenId, owner: Color) -> Self {
        Self {
            id,
            owner,
            position: Position::BASE,
        }
    }

    /// Copy of this token at another position.
    #[must_use]
    pub const fn at(self, position: Position) -> Self {
        Self { position, ..self }
    }
}
