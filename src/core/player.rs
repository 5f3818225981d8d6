//! Player identification, roster entries, and per-player token sets.
//!
//! ## PlayerId
//!
//! Opaque identifier chosen by whoever starts the match (lobby, simulator,
//! tests). The engine only compares IDs; seat order comes from the roster.
//!
//! ## PlayerSpec
//!
//! What a caller supplies to start a match: id, color, bot flag, luck.
//!
//! ## Player
//!
//! A seated player with its four tokens.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::token::{Position, Token, TokenId, TOKENS_PER_PLAYER};

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Dice bias parameter in `[0, 1]`.
///
/// Values above 0.8 favor sixes, values below 0.2 favor ones, anything in
/// between rolls a fair die. Out-of-range inputs are clamped and NaN becomes
/// the neutral 0.5.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct LuckFactor(f64);

impl LuckFactor {
    pub const NEUTRAL: LuckFactor = LuckFactor(0.5);

    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::NEUTRAL
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for LuckFactor {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<f64> for LuckFactor {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<LuckFactor> for f64 {
    fn from(luck: LuckFactor) -> Self {
        luck.0
    }
}

/// Roster entry used to start a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub id: PlayerId,
    pub color: Color,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub luck: LuckFactor,
}

impl PlayerSpec {
    /// A human seat with neutral luck.
    pub fn new(id: PlayerId, color: Color) -> Self {
        Self {
            id,
            color,
            is_bot: false,
            luck: LuckFactor::NEUTRAL,
        }
    }

    /// Mark this seat as driven by a bot.
    #[must_use]
    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    /// Set the luck factor.
    #[must_use]
    pub fn with_luck(mut self, luck: f64) -> Self {
        self.luck = LuckFactor::new(luck);
        self
    }
}

/// A seated player and their tokens.
///
/// All four tokens always carry `owner == color`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub color: Color,
    pub is_bot: bool,
    pub luck: LuckFactor,
    tokens: [Token; TOKENS_PER_PLAYER],
}

impl Player {
    /// Seat a player with every token in base.
    #[must_use]
    pub fn seat(spec: &PlayerSpec) -> Self {
        let tokens = [0u8, 1, 2, 3].map(|i| Token::in_base(TokenId(i), spec.color));
        Self {
            id: spec.id,
            color: spec.color,
            is_bot: spec.is_bot,
            luck: spec.luck,
            tokens,
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token; TOKENS_PER_PLAYER] {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    /// Copy of this player with one token moved.
    #[must_use]
    pub fn with_token_at(&self, id: TokenId, position: Position) -> Self {
        let mut next = self.clone();
        if let Some(token) = next.tokens.get_mut(id.index()) {
            *token = token.at(position);
        }
        next
    }

    /// True once every token has reached the finish.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.tokens.iter().all(|t| t.position.is_finished())
    }

    /// Number of tokens at the finish.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.position.is_finished()).count()
    }
}
