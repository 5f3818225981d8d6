//! Authoritative turn state machine.
//!
//! ## Phases
//!
//! `Waiting → Playing → Finished`. Inside `Playing` each turn alternates
//! between awaiting a roll and awaiting a move; a roll with no legal move
//! passes the turn immediately.
//!
//! ## Continuation after a move
//!
//! 1. The mover just finished their last token: pass.
//! 2. Dice was six: count it; at the limit pass, else roll again.
//! 3. A capture happened: roll again.
//! 4. Otherwise: pass.
//!
//! Every accepted command renews the turn deadline. Rejected commands leave
//! the input state untouched because it is only ever borrowed.

use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument};

use crate::core::{
    Color, EventRecord, ExtraTurnReason, GameEvent, GameRng, GameState, MatchConfig, MatchStatus,
    PassReason, Player, PlayerId, PlayerSpec, RandomSource, TokenId,
};
use crate::rules::{destination, legal_moves, CaptureResolver, DiceRoller, LegalMoves};

use super::command::{Command, Rejection, Transition};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Applies commands to match states.
///
/// Owns the dice and the rules configuration, never the state itself; the
/// caller keeps whichever version it considers current.
#[derive(Clone, Debug)]
pub struct TurnController<R: RandomSource = GameRng> {
    config: MatchConfig,
    dice: DiceRoller<R>,
}

impl TurnController<GameRng> {
    /// Controller with dice seeded from `config.seed`.
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let dice = DiceRoller::seeded(config.seed);
        Self { config, dice }
    }
}

impl<R: RandomSource> TurnController<R> {
    /// Controller drawing dice from a custom source.
    #[must_use]
    pub fn with_source(config: MatchConfig, source: R) -> Self {
        Self {
            config,
            dice: DiceRoller::new(source),
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Apply one command.
    #[instrument(level = "debug", skip(self, state, command), fields(command = command.name()))]
    pub fn apply(&mut self, state: &GameState, command: Command) -> Result<Transition, Rejection> {
        let result = match command {
            Command::StartMatch { players } => self.start_match(state, &players),
            Command::RollDice { player } => self.roll_dice(state, player),
            Command::MoveToken { player, token } => self.move_token(state, player, token),
            Command::TimeElapsed { generation } => self.time_elapsed(state, generation),
        };
        match &result {
            Ok(transition) => debug!(
                events = transition.events.len(),
                current = transition.state.current_player_index(),
                "accepted"
            ),
            Err(rejection) => debug!(%rejection, "rejected"),
        }
        result
    }

    /// `Waiting → Playing` with every token in base and seat 0 to roll.
    pub fn start_match(
        &self,
        state: &GameState,
        players: &[PlayerSpec],
    ) -> Result<Transition, Rejection> {
        if state.status != MatchStatus::Waiting {
            return Err(Rejection::MatchAlreadyStarted);
        }
        validate_roster(players)?;

        let mut draft = Draft::new(state);
        draft.state.players = players.iter().map(Player::seat).collect();
        draft.state.status = MatchStatus::Playing;
        draft.state.current_player_index = 0;
        draft.state.dice_value = None;
        draft.state.consecutive_sixes = 0;
        draft.state.winners.clear();
        draft.state.turn_number = 1;
        draft.log(GameEvent::MatchStarted {
            players: players.iter().map(|p| (p.id, p.color)).collect(),
        });
        draft.renew_deadline(&self.config);

        info!(players = players.len(), "match started");
        Ok(draft.finish())
    }

    /// Roll for the current player. No legal move passes the turn at once.
    pub fn roll_dice(&mut self, state: &GameState, player: PlayerId) -> Result<Transition, Rejection> {
        let current = check_turn(state, player)?;
        if state.dice_value.is_some() {
            return Err(Rejection::RollAlreadyPending);
        }

        let value = self.dice.roll(current.luck);
        let movable = legal_moves(current, value);

        let mut draft = Draft::new(state);
        draft.state.dice_value = Some(value);
        draft.log(GameEvent::DiceRolled { player, value });
        debug!(%player, value, movable = movable.len(), "rolled");

        if movable.is_empty() {
            draft.pass_turn(PassReason::NoLegalMove);
        }
        draft.renew_deadline(&self.config);
        Ok(draft.finish())
    }

    /// Move one of the current player's tokens by the pending dice value.
    pub fn move_token(
        &self,
        state: &GameState,
        player: PlayerId,
        token: TokenId,
    ) -> Result<Transition, Rejection> {
        let current = check_turn(state, player)?;
        let dice = state.dice_value.ok_or(Rejection::NoRollPending)?;
        let moving = *current
            .token(token)
            .ok_or(Rejection::IllegalMove { player, token })?;
        let to = destination(&moving, dice).ok_or(Rejection::IllegalMove { player, token })?;

        let seat = state.current_player_index;
        let mut draft = Draft::new(state);

        draft.state.players.set(seat, current.with_token_at(token, to));
        draft.log(GameEvent::TokenMoved {
            player,
            token,
            from: moving.position,
            to,
        });

        let (players, captures) =
            CaptureResolver::resolve(&draft.state.players, seat, &moving.at(to));
        draft.state.players = players;
        for capture in &captures {
            let victim = draft.state.players[capture.player_index].id;
            debug!(by = %player, %victim, token = %capture.token, "captured");
            draft.log(GameEvent::TokenCaptured {
                by: player,
                victim,
                token: capture.token,
                from: capture.from,
            });
        }

        let finished_now = draft.record_completion(seat);
        if draft.state.status == MatchStatus::Finished {
            draft.state.dice_value = None;
            draft.renew_deadline(&self.config);
            return Ok(draft.finish());
        }

        if finished_now {
            draft.pass_turn(PassReason::PlayerFinished);
        } else if dice == 6 {
            draft.state.consecutive_sixes += 1;
            if draft.state.consecutive_sixes >= self.config.max_consecutive_sixes {
                draft.pass_turn(PassReason::ConsecutiveSixes);
            } else {
                draft.log(GameEvent::ExtraTurnGranted {
                    player,
                    reason: ExtraTurnReason::RolledSix,
                });
            }
        } else if !captures.is_empty() {
            draft.state.consecutive_sixes = 0;
            draft.log(GameEvent::ExtraTurnGranted {
                player,
                reason: ExtraTurnReason::Captured,
            });
        } else {
            draft.pass_turn(PassReason::MoveCompleted);
        }

        draft.state.dice_value = None;
        draft.renew_deadline(&self.config);
        Ok(draft.finish())
    }

    /// The current phase's countdown ran out: the current player forfeits
    /// the turn.
    pub fn time_elapsed(&self, state: &GameState, generation: u64) -> Result<Transition, Rejection> {
        if state.status != MatchStatus::Playing {
            return Err(Rejection::MatchNotPlaying {
                status: state.status,
            });
        }
        let expected = state.turn_deadline.generation;
        if generation != expected {
            return Err(Rejection::StaleTimeout {
                expected,
                got: generation,
            });
        }

        let mut draft = Draft::new(state);
        draft.pass_turn(PassReason::TimedOut);
        draft.renew_deadline(&self.config);
        Ok(draft.finish())
    }
}

/// Legal moves for the pending dice value, empty while awaiting a roll.
#[must_use]
pub fn pending_moves(state: &GameState) -> LegalMoves {
    match (state.current_player(), state.dice_value) {
        (Some(player), Some(dice)) => legal_moves(player, dice),
        _ => LegalMoves::new(),
    }
}

fn check_turn(state: &GameState, player: PlayerId) -> Result<&Player, Rejection> {
    let current = match state.current_player() {
        Some(current) => current,
        None => {
            return Err(Rejection::MatchNotPlaying {
                status: state.status,
            })
        }
    };
    if current.id != player {
        return Err(Rejection::NotYourTurn {
            player,
            current: current.id,
        });
    }
    Ok(current)
}

fn validate_roster(players: &[PlayerSpec]) -> Result<(), Rejection> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(Rejection::InvalidRoster(format!(
            "{} players, expected {MIN_PLAYERS}..={MAX_PLAYERS}",
            players.len()
        )));
    }
    let mut ids: FxHashSet<PlayerId> = FxHashSet::default();
    let mut colors: FxHashSet<Color> = FxHashSet::default();
    for spec in players {
        if !ids.insert(spec.id) {
            return Err(Rejection::InvalidRoster(format!("duplicate id {}", spec.id)));
        }
        if !colors.insert(spec.color) {
            return Err(Rejection::InvalidRoster(format!("duplicate color {}", spec.color)));
        }
    }
    Ok(())
}

/// Next version of a state under construction, plus the events logged so far.
struct Draft {
    state: GameState,
    events: Vec<EventRecord>,
}

impl Draft {
    fn new(state: &GameState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }

    fn log(&mut self, event: GameEvent) {
        let record = EventRecord {
            sequence: self.state.event_log.len() as u64,
            turn: self.state.turn_number,
            event,
        };
        self.state.event_log.push_back(record.clone());
        self.events.push(record);
    }

    fn renew_deadline(&mut self, config: &MatchConfig) {
        self.state.turn_deadline = self.state.turn_deadline.renewed(config.turn_timeout_ticks);
    }

    /// Hand the turn to the next seat that has not won yet.
    fn pass_turn(&mut self, reason: PassReason) {
        let count = self.state.players.len();
        let from_index = self.state.current_player_index;
        let next_index = (1..=count)
            .map(|step| (from_index + step) % count)
            .find(|&i| !self.state.winners.contains(&self.state.players[i].id))
            .unwrap_or(from_index);

        let from = self.state.players[from_index].id;
        let to = self.state.players[next_index].id;
        self.state.current_player_index = next_index;
        self.state.dice_value = None;
        self.state.consecutive_sixes = 0;
        self.state.turn_number += 1;
        self.log(GameEvent::TurnPassed { from, to, reason });
    }

    /// Record a win for `seat` if all its tokens are home. Marks the match
    /// finished when only one player is left. Returns whether the seat won
    /// just now.
    fn record_completion(&mut self, seat: usize) -> bool {
        let player = &self.state.players[seat];
        let id = player.id;
        if !player.has_finished() || self.state.winners.contains(&id) {
            return false;
        }

        self.state.winners.push_back(id);
        let place = self.state.winners.len();
        info!(player = %id, place, "player finished");
        self.log(GameEvent::PlayerWon { player: id, place });

        if self.state.winners.len() + 1 >= self.state.players.len() {
            self.state.status = MatchStatus::Finished;
            let standings = self.state.standings();
            info!(?standings, "match finished");
            self.log(GameEvent::MatchFinished { standings });
        }
        true
    }

    fn finish(self) -> Transition {
        Transition {
            state: self.state,
            events: self.events,
        }
    }
}
