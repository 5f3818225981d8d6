//! Move legality.
//!
//! | Token position | Legal when                  |
//! |----------------|-----------------------------|
//! | `57`           | never                       |
//! | `-1`           | `dice == 6`                 |
//! | otherwise      | `position + dice <= 57`     |

use smallvec::SmallVec;

use crate::core::{Player, Position, Token, TokenId};

/// Legal token IDs for one roll, ascending. At most four.
pub type LegalMoves = SmallVec<[TokenId; 4]>;

/// Whether `token` may move with `dice`.
#[must_use]
pub fn can_move(token: &Token, dice: u8) -> bool {
    destination(token, dice).is_some()
}

/// Where `token` ends up with `dice`, or `None` if the move is illegal.
///
/// Leaving base always lands on the entry cell, never further.
#[must_use]
pub fn destination(token: &Token, dice: u8) -> Option<Position> {
    if !(1..=6).contains(&dice) || token.position.is_finished() {
        return None;
    }
    if token.position.is_base() {
        return (dice == 6).then_some(Position::ENTRY);
    }
    token.position.advanced_by(dice)
}

/// Tokens of `player` that can move with `dice`.
#[must_use]
pub fn legal_moves(player: &Player, dice: u8) -> LegalMoves {
    player
        .tokens()
        .iter()
        .filter(|t| can_move(t, dice))
        .map(|t| t.id)
        .collect()
}
