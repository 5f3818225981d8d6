//! One task per match.
//!
//! The actor owns the only live `GameState` and the `TurnController`.
//! Players and bots send a [`PlayerAction`] through the mailbox, so commands
//! are applied strictly one at a time. The turn timer runs inside the same
//! `select!` loop and, when it fires, is handled as a `TimeElapsed` command
//! like any other. Only the actor itself can issue `TimeElapsed`. A timer armed for an old deadline
//! generation is dropped when the generation changes, and would be rejected
//! as stale anyway.
//!
//! Observers get every accepted transition on a broadcast channel and the
//! latest state on a watch channel. Neither can write back.
//!
//! The task ends when the match finishes or every handle is dropped; the
//! join handle yields the final state.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, instrument, warn};

use crate::core::{
    ConfigError, EventRecord, GameRng, GameState, MatchConfig, MatchStatus, PlayerId,
    PlayerSpec, RandomSource, TokenId,
};
use crate::turn::{Command, Rejection, Transition, TurnController};

const MAILBOX_CAPACITY: usize = 64;
const UPDATE_CAPACITY: usize = 256;

/// An accepted transition as seen by observers.
#[derive(Clone, Debug)]
pub struct MatchUpdate {
    pub state: GameState,
    pub events: Vec<EventRecord>,
}

/// Why a match could not start, or a submitted action did not take effect.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error("match actor has stopped")]
    Closed,
}

/// What a seated player may ask of a running match.
///
/// Starting the match and expiring a turn are not among them: the first
/// happens in [`spawn_match`], the second only when the actor's own timer
/// runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    RollDice { player: PlayerId },
    MoveToken { player: PlayerId, token: TokenId },
}

impl From<PlayerAction> for Command {
    fn from(action: PlayerAction) -> Self {
        match action {
            PlayerAction::RollDice { player } => Command::RollDice { player },
            PlayerAction::MoveToken { player, token } => Command::MoveToken { player, token },
        }
    }
}

impl TryFrom<Command> for PlayerAction {
    type Error = Command;

    /// Hands back commands that players are not allowed to send.
    fn try_from(command: Command) -> Result<Self, Self::Error> {
        match command {
            Command::RollDice { player } => Ok(PlayerAction::RollDice { player }),
            Command::MoveToken { player, token } => Ok(PlayerAction::MoveToken { player, token }),
            other => Err(other),
        }
    }
}

struct Envelope {
    action: PlayerAction,
    reply: oneshot::Sender<Result<GameState, Rejection>>,
}

/// Cheap, cloneable access to a running match.
#[derive(Clone)]
pub struct MatchHandle {
    commands: mpsc::Sender<Envelope>,
    snapshots: watch::Receiver<GameState>,
    updates: broadcast::Sender<Arc<MatchUpdate>>,
}

impl MatchHandle {
    /// Submit an action and wait for the resulting state.
    pub async fn submit(&self, action: PlayerAction) -> Result<GameState, MatchError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Envelope { action, reply })
            .await
            .map_err(|_| MatchError::Closed)?;
        let result = response.await.map_err(|_| MatchError::Closed)?;
        Ok(result?)
    }

    pub async fn roll(&self, player: PlayerId) -> Result<GameState, MatchError> {
        self.submit(PlayerAction::RollDice { player }).await
    }

    pub async fn move_token(&self, player: PlayerId, token: TokenId) -> Result<GameState, MatchError> {
        self.submit(PlayerAction::MoveToken { player, token }).await
    }

    /// Latest state. Still available after the actor has stopped.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified whenever the state changes.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<GameState> {
        self.snapshots.clone()
    }

    /// Stream of accepted transitions from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<MatchUpdate>> {
        self.updates.subscribe()
    }
}

/// Start a match with dice seeded from `config.seed`.
pub fn spawn_match(
    config: MatchConfig,
    roster: &[PlayerSpec],
) -> Result<(MatchHandle, JoinHandle<GameState>), MatchError> {
    spawn_match_with(TurnController::<GameRng>::new(config), roster)
}

/// Start a match with a prepared controller.
///
/// The config and roster are validated before the task is spawned, so
/// either problem is reported here rather than through the mailbox.
pub fn spawn_match_with<R>(
    mut controller: TurnController<R>,
    roster: &[PlayerSpec],
) -> Result<(MatchHandle, JoinHandle<GameState>), MatchError>
where
    R: RandomSource + 'static,
{
    controller.config().validate()?;
    let started = controller.apply(
        &GameState::waiting(),
        Command::StartMatch {
            players: roster.to_vec(),
        },
    )?;

    let (commands, mailbox) = mpsc::channel(MAILBOX_CAPACITY);
    let (snapshot_tx, snapshots) = watch::channel(started.state.clone());
    let (updates, _) = broadcast::channel(UPDATE_CAPACITY);

    let actor = MatchActor {
        armed_generation: started.state.turn_deadline().generation,
        deadline_at: Instant::now() + controller.config().turn_timeout(),
        state: started.state,
        controller,
        mailbox,
        snapshots: snapshot_tx,
        updates: updates.clone(),
    };
    let task = tokio::spawn(actor.run());

    Ok((
        MatchHandle {
            commands,
            snapshots,
            updates,
        },
        task,
    ))
}

struct MatchActor<R: RandomSource> {
    state: GameState,
    controller: TurnController<R>,
    mailbox: mpsc::Receiver<Envelope>,
    snapshots: watch::Sender<GameState>,
    updates: broadcast::Sender<Arc<MatchUpdate>>,
    armed_generation: u64,
    deadline_at: Instant,
}

impl<R: RandomSource> MatchActor<R> {
    #[instrument(name = "match_actor", skip_all)]
    async fn run(mut self) -> GameState {
        info!(players = self.state.player_count(), "match actor running");

        while self.state.status() == MatchStatus::Playing {
            tokio::select! {
                envelope = self.mailbox.recv() => {
                    let Some(Envelope { action, reply }) = envelope else {
                        debug!("all handles dropped");
                        break;
                    };
                    let result = self.handle(action.into());
                    // The caller may have given up waiting; the command still counts.
                    let _ = reply.send(result);
                }
                () = sleep_until(self.deadline_at) => {
                    let generation = self.armed_generation;
                    debug!(generation, "turn deadline elapsed");
                    let _ = self.handle(Command::TimeElapsed { generation });
                }
            }
        }

        info!(status = %self.state.status(), "match actor stopped");
        self.state
    }

    fn handle(&mut self, command: Command) -> Result<GameState, Rejection> {
        match self.controller.apply(&self.state, command) {
            Ok(Transition { state, events }) => {
                self.state = state;
                self.rearm();
                self.snapshots.send_replace(self.state.clone());
                // No subscribers is fine.
                let _ = self.updates.send(Arc::new(MatchUpdate {
                    state: self.state.clone(),
                    events,
                }));
                Ok(self.state.clone())
            }
            Err(rejection) => {
                warn!(%rejection, "command rejected");
                Err(rejection)
            }
        }
    }

    /// Restart the countdown when the deadline generation has moved on.
    fn rearm(&mut self) {
        let generation = self.state.turn_deadline().generation;
        if generation != self.armed_generation {
            self.armed_generation = generation;
            self.deadline_at = Instant::now() + self.controller.config().turn_timeout();
        }
    }
}
