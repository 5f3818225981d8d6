//! Match state.
//!
//! `GameState` is a value: the turn controller reads one version and returns
//! the next. Players, winners and the event log live in `im` persistent
//! vectors, so keeping old versions around (for observers, replays, or a
//! rejected command) costs O(1) per clone and never aliases mutable data.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::event::EventRecord;
use super::player::{Player, PlayerId};
use super::token::{Position, TokenId};

/// Match lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Waiting,
    Playing,
    Finished,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchStatus::Waiting => "waiting",
            MatchStatus::Playing => "playing",
            MatchStatus::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Sub-phase of the current turn while `Playing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitRoll,
    AwaitMove { dice: u8 },
}

/// Countdown attached to the current phase.
///
/// `generation` changes every time a command is accepted. A timeout carries
/// the generation it was scheduled for; if that no longer matches, the
/// timeout is stale and ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnDeadline {
    pub generation: u64,
    pub ticks: u32,
}

impl TurnDeadline {
    #[must_use]
    pub const fn renewed(self, ticks: u32) -> Self {
        Self {
            generation: self.generation + 1,
            ticks,
        }
    }
}

/// Complete match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) players: Vector<Player>,
    pub(crate) current_player_index: usize,
    pub(crate) dice_value: Option<u8>,
    pub(crate) turn_deadline: TurnDeadline,
    pub(crate) consecutive_sixes: u8,
    pub(crate) winners: Vector<PlayerId>,
    pub(crate) event_log: Vector<EventRecord>,
    pub(crate) status: MatchStatus,
    /// Incremented every time the turn passes to another player.
    pub(crate) turn_number: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::waiting()
    }
}

impl GameState {
    /// Empty state before `StartMatch`.
    #[must_use]
    pub fn waiting() -> Self {
        Self {
            players: Vector::new(),
            current_player_index: 0,
            dice_value: None,
            turn_deadline: TurnDeadline::default(),
            consecutive_sixes: 0,
            winners: Vector::new(),
            event_log: Vector::new(),
            status: MatchStatus::Waiting,
            turn_number: 0,
        }
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// The player whose turn it is, while `Playing`.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        match self.status {
            MatchStatus::Playing => self.players.get(self.current_player_index),
            _ => None,
        }
    }

    /// Pending dice value; `None` exactly when a roll is awaited.
    #[must_use]
    pub fn dice_value(&self) -> Option<u8> {
        self.dice_value
    }

    #[must_use]
    pub fn phase(&self) -> Option<TurnPhase> {
        match self.status {
            MatchStatus::Playing => Some(match self.dice_value {
                None => TurnPhase::AwaitRoll,
                Some(dice) => TurnPhase::AwaitMove { dice },
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn turn_deadline(&self) -> TurnDeadline {
        self.turn_deadline
    }

    #[must_use]
    pub fn consecutive_sixes(&self) -> u8 {
        self.consecutive_sixes
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Players who finished, in completion order.
    #[must_use]
    pub fn winners(&self) -> &Vector<PlayerId> {
        &self.winners
    }

    #[must_use]
    pub fn has_won(&self, id: PlayerId) -> bool {
        self.winners.contains(&id)
    }

    #[must_use]
    pub fn event_log(&self) -> &Vector<EventRecord> {
        &self.event_log
    }

    // === Position setup ===
    //
    // Puzzles, tutorials and tests start from arranged positions. These
    // bypass the rules and log nothing.

    /// Copy with one token placed at `position`. `None` if the player is
    /// not seated.
    #[must_use]
    pub fn with_token_at(&self, player: PlayerId, token: TokenId, position: Position) -> Option<Self> {
        let index = self.player_index(player)?;
        let mut next = self.clone();
        let updated = next.players[index].with_token_at(token, position);
        next.players.set(index, updated);
        Some(next)
    }

    /// Copy with the turn handed to `player`, awaiting a roll.
    #[must_use]
    pub fn with_current_player(&self, player: PlayerId) -> Option<Self> {
        let index = self.player_index(player)?;
        let mut next = self.clone();
        next.current_player_index = index;
        next.dice_value = None;
        next.consecutive_sixes = 0;
        Some(next)
    }

    /// Final ranking: winners in order, then everyone else in seat order.
    ///
    /// Once `Finished` exactly one player is left over and takes last place.
    #[must_use]
    pub fn standings(&self) -> Vec<PlayerId> {
        let mut standings: Vec<PlayerId> = self.winners.iter().copied().collect();
        standings.extend(
            self.players
                .iter()
                .map(|p| p.id)
                .filter(|id| !self.winners.contains(id)),
        );
        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, PlayerSpec};

    #[test]
    fn test_waiting_state() {
        let state = GameState::waiting();
        assert_eq!(state.status(), MatchStatus::Waiting);
        assert_eq!(state.player_count(), 0);
        assert!(state.current_player().is_none());
        assert!(state.phase().is_none());
    }

    #[test]
    fn test_phase_follows_dice() {
        let mut state = GameState::waiting();
        state.players.push_back(Player::seat(&PlayerSpec::new(PlayerId::new(1), Color::Red)));
        state.status = MatchStatus::Playing;
        assert_eq!(state.phase(), Some(TurnPhase::AwaitRoll));

        state.dice_value = Some(4);
        assert_eq!(state.phase(), Some(TurnPhase::AwaitMove { dice: 4 }));
    }

    #[test]
    fn test_standings_append_remaining_in_seat_order() {
        let mut state = GameState::waiting();
        for (id, color) in [(10, Color::Red), (20, Color::Blue), (30, Color::Yellow)] {
            state.players.push_back(Player::seat(&PlayerSpec::new(PlayerId::new(id), color)));
        }
        state.winners.push_back(PlayerId::new(30));

        assert_eq!(
            state.standings(),
            vec![PlayerId::new(30), PlayerId::new(10), PlayerId::new(20)]
        );
    }

    #[test]
    fn test_deadline_renewal() {
        let deadline = TurnDeadline::default().renewed(15);
        assert_eq!(deadline.generation, 1);
        assert_eq!(deadline.renewed(15).generation, 2);
    }
}
