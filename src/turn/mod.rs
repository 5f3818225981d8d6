//! Turn sequencing.
//!
//! [`TurnController`] is the single place that produces new match states.
//! Human input, bot decisions and the turn timer all arrive as [`Command`]s.

pub mod command;
pub mod controller;

pub use command::{Command, Rejection, RejectionCode, Transition};
pub use controller::{pending_moves, TurnController, MAX_PLAYERS, MIN_PLAYERS};
