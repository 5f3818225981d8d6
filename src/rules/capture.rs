//! Capture ("send home") resolution.
//!
//! After a token lands on the shared track, each opposing player is checked
//! on its own. If exactly one of that player's tokens shares the landing
//! cell, it goes back to base. Two or more (a blockade) are left alone. One
//! landing can capture from several opponents at once.
//!
//! Nothing is captured on a safe square or in the home stretch.

use im::Vector;
use smallvec::SmallVec;
use tracing::debug;

use crate::board::{is_safe_square, same_cell};
use crate::core::{Player, Position, Token, TokenId};

/// An opposing token that will be sent home.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    /// Seat index of the victim's owner.
    pub player_index: usize,
    pub token: TokenId,
    /// Where the victim stood before the capture.
    pub from: Position,
}

pub type Captures = SmallVec<[Capture; 3]>;

/// Applies and previews captures for a landing token.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaptureResolver;

impl CaptureResolver {
    /// Captures that `landed` would cause, without changing anything.
    ///
    /// `mover_index` is the seat of the token's owner; its own tokens are
    /// never candidates.
    #[must_use]
    pub fn preview(players: &Vector<Player>, mover_index: usize, landed: &Token) -> Captures {
        let mut captures = Captures::new();
        if !landed.position.on_track() || is_safe_square(landed.owner, landed.position) {
            return captures;
        }

        for (index, player) in players.iter().enumerate() {
            if index == mover_index {
                continue;
            }
            let mut on_cell = player.tokens().iter().filter(|t| same_cell(landed, t));
            match (on_cell.next(), on_cell.next()) {
                (Some(victim), None) => captures.push(Capture {
                    player_index: index,
                    token: victim.id,
                    from: victim.position,
                }),
                (Some(_), Some(_)) => {
                    debug!(
                        color = %player.color,
                        cell = ?crate::board::track_index(landed.owner, landed.position),
                        "blockade holds"
                    );
                }
                _ => {}
            }
        }
        captures
    }

    /// Send every previewed victim home and return the new player list.
    #[must_use]
    pub fn resolve(
        players: &Vector<Player>,
        mover_index: usize,
        landed: &Token,
    ) -> (Vector<Player>, Captures) {
        let captures = Self::preview(players, mover_index, landed);
        let mut next = players.clone();
        for capture in &captures {
            if let Some(victim) = next.get(capture.player_index) {
                let updated = victim.with_token_at(capture.token, Position::BASE);
                next.set(capture.player_index, updated);
            }
        }
        (next, captures)
    }
}
