//! Synchronous self-play.
//!
//! Runs a whole match through [`TurnController`] with every seat played by
//! one policy. No timers, no tasks; used by the simulator binary, benches
//! and tests.

use tracing::debug;

use crate::bot::MovePolicy;
use crate::core::{GameState, MatchStatus, PlayerSpec, RandomSource};
use crate::turn::{pending_moves, Command, Rejection, TurnController};

/// Upper bound on commands for one simulated match.
pub const DEFAULT_MAX_COMMANDS: usize = 20_000;

/// Play a match from `StartMatch` until it finishes or `max_commands` have
/// been applied. Returns the last state reached.
pub fn play_match<R: RandomSource>(
    controller: &mut TurnController<R>,
    roster: &[PlayerSpec],
    policy: &dyn MovePolicy,
    max_commands: usize,
) -> Result<GameState, Rejection> {
    let mut state = controller
        .apply(
            &GameState::waiting(),
            Command::StartMatch {
                players: roster.to_vec(),
            },
        )?
        .state;

    for _ in 0..max_commands {
        if state.status() == MatchStatus::Finished {
            break;
        }
        let Some(current) = state.current_player() else {
            break;
        };
        let player = current.id;
        let command = if state.dice_value().is_none() {
            Command::RollDice { player }
        } else {
            let legal = pending_moves(&state);
            match policy.choose(&state, &legal) {
                Some(token) => Command::MoveToken { player, token },
                None => Command::TimeElapsed {
                    generation: state.turn_deadline().generation,
                },
            }
        };
        state = controller.apply(&state, command)?.state;
    }

    debug!(
        status = %state.status(),
        events = state.event_log().len(),
        "simulated match ended"
    );
    Ok(state)
}
