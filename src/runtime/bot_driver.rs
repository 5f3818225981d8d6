//! Drives bot seats through the same command path as humans.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::bot::MovePolicy;
use crate::core::{MatchStatus, PlayerId};
use crate::turn::pending_moves;

use super::actor::{MatchError, MatchHandle, PlayerAction};

/// Plays one seat with a [`MovePolicy`].
///
/// Waits `delay` before each action so bots look human; the delay has no
/// effect on the rules.
pub struct BotDriver {
    handle: MatchHandle,
    player: PlayerId,
    policy: Arc<dyn MovePolicy>,
    delay: Duration,
}

impl BotDriver {
    pub fn new(
        handle: MatchHandle,
        player: PlayerId,
        policy: Arc<dyn MovePolicy>,
        delay: Duration,
    ) -> Self {
        Self {
            handle,
            player,
            policy,
            delay,
        }
    }

    /// Run on the current tokio runtime until the match ends.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    #[instrument(name = "bot", skip(self), fields(player = %self.player, policy = self.policy.name()))]
    async fn run(self) {
        let mut snapshots = self.handle.watch();
        loop {
            let state = snapshots.borrow_and_update().clone();
            if state.status() != MatchStatus::Playing {
                return;
            }

            let my_turn = state.current_player().map(|p| p.id) == Some(self.player);
            let action = if !my_turn {
                None
            } else if state.dice_value().is_none() {
                Some(PlayerAction::RollDice {
                    player: self.player,
                })
            } else {
                let legal = pending_moves(&state);
                match self.policy.choose(&state, &legal) {
                    Some(token) => Some(PlayerAction::MoveToken {
                        player: self.player,
                        token,
                    }),
                    None => {
                        warn!(legal = legal.len(), "policy made no choice");
                        None
                    }
                }
            };

            if let Some(action) = action {
                tokio::time::sleep(self.delay).await;
                match self.handle.submit(action).await {
                    Ok(_) => continue,
                    Err(MatchError::Rejected(rejection)) => {
                        // The turn moved on while we were waiting (e.g. it timed out).
                        debug!(%rejection, "bot command rejected");
                    }
                    Err(err) => {
                        debug!(%err, "match unavailable");
                        return;
                    }
                }
            }

            if snapshots.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Spawn a driver for every bot seat in the match, all using `policy`.
pub fn spawn_bots(
    handle: &MatchHandle,
    policy: Arc<dyn MovePolicy>,
    delay: Duration,
) -> Vec<JoinHandle<()>> {
    handle
        .snapshot()
        .players()
        .iter()
        .filter(|p| p.is_bot)
        .map(|p| BotDriver::new(handle.clone(), p.id, Arc::clone(&policy), delay).spawn())
        .collect()
}
