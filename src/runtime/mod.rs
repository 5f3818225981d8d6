//! Async hosting for live matches.
//!
//! - `actor`: one tokio task per match, serialized command mailbox, turn timer
//! - `bot_driver`: bot seats submitting ordinary commands
//! - `archive`: bincode bytes for finished matches

pub mod actor;
pub mod bot_driver;
pub mod archive;

pub use actor::{
    spawn_match, spawn_match_with, MatchError, MatchHandle, MatchUpdate, PlayerAction,
};
pub use bot_driver::{spawn_bots, BotDriver};
pub use archive::ArchiveError;
