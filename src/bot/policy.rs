//! Move policies for automated seats.
//!
//! A policy only picks a token; it never touches the state. Whatever it
//! picks is submitted as an ordinary `MoveToken` command, so policies can be
//! swapped without changing the turn controller.

use crate::board::is_safe_square;
use crate::core::{GameState, Position, TokenId};
use crate::rules::{destination, CaptureResolver};

// =============================================================================
// Move Policy
// =============================================================================

/// Chooses which token to move for the current player.
pub trait MovePolicy: Send + Sync {
    /// Pick one of `legal` (ascending token IDs) for the current player.
    ///
    /// Returns `None` if `legal` is empty or there is no pending roll.
    fn choose(&self, state: &GameState, legal: &[TokenId]) -> Option<TokenId>;

    /// Name for logs.
    fn name(&self) -> &'static str;
}

/// Always moves the lowest-numbered legal token.
#[derive(Clone, Debug, Default)]
pub struct FirstMovablePolicy;

impl MovePolicy for FirstMovablePolicy {
    fn choose(&self, _state: &GameState, legal: &[TokenId]) -> Option<TokenId> {
        legal.first().copied()
    }

    fn name(&self) -> &'static str {
        "first-movable"
    }
}

// =============================================================================
// Greedy Policy
// =============================================================================

pub const EXIT_BASE_BONUS: i32 = 500;
pub const FINISH_BONUS: i32 = 1000;
pub const HOME_STRETCH_BONUS: i32 = 100;
pub const CAPTURE_BONUS: i32 = 800;
pub const SAFE_SQUARE_BONUS: i32 = 300;

/// Single-ply greedy heuristic.
///
/// Scores each legal move on its own, with no lookahead and no model of the
/// opponents' replies:
///
/// | Term                               | Score          |
/// |------------------------------------|----------------|
/// | current position                   | `position`     |
/// | leaves base                        | +500           |
/// | reaches the finish                 | +1000          |
/// | lands past the home-stretch entry  | +100           |
/// | would capture                      | +800           |
/// | lands on a safe square             | +300           |
///
/// Highest score wins; ties go to the lowest token ID.
#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    /// Score of moving `token` with the pending dice, `None` if illegal.
    #[must_use]
    pub fn score(state: &GameState, token: TokenId) -> Option<i32> {
        let player = state.current_player()?;
        let dice = state.dice_value()?;
        let current = player.token(token)?;
        let to = destination(current, dice)?;

        let mut score = i32::from(current.position.value());
        if current.position.is_base() {
            score += EXIT_BASE_BONUS;
        }
        if to.is_finished() {
            score += FINISH_BONUS;
        }
        if to > Position::HOME_STRETCH_START {
            score += HOME_STRETCH_BONUS;
        }
        let landed = current.at(to);
        if !CaptureResolver::preview(state.players(), state.current_player_index(), &landed)
            .is_empty()
        {
            score += CAPTURE_BONUS;
        }
        if is_safe_square(player.color, to) {
            score += SAFE_SQUARE_BONUS;
        }
        Some(score)
    }
}

impl MovePolicy for GreedyPolicy {
    fn choose(&self, state: &GameState, legal: &[TokenId]) -> Option<TokenId> {
        let mut best: Option<(TokenId, i32)> = None;
        for &token in legal {
            let Some(score) = Self::score(state, token) else {
                continue;
            };
            match best {
                Some((best_token, best_score))
                    if score < best_score || (score == best_score && token > best_token) => {}
                _ => best = Some((token, score)),
            }
        }
        best.map(|(token, _)| token)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
