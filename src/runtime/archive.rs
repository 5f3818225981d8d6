//! Archiving finished matches as compact bytes.

use thiserror::Error;

use crate::core::{GameState, MatchStatus};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("only finished matches are archived; match is {0}")]
    NotFinished(MatchStatus),
    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Encode a finished match, event log included.
pub fn encode(state: &GameState) -> Result<Vec<u8>, ArchiveError> {
    if state.status() != MatchStatus::Finished {
        return Err(ArchiveError::NotFinished(state.status()));
    }
    Ok(bincode::serialize(state)?)
}

/// Decode an archived match.
pub fn decode(bytes: &[u8]) -> Result<GameState, ArchiveError> {
    let state: GameState = bincode::deserialize(bytes)?;
    if state.status() != MatchStatus::Finished {
        return Err(ArchiveError::NotFinished(state.status()));
    }
    Ok(state)
}
