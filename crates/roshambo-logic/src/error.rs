//! Error types for the game engine and its console boundary

use std::io;
use thiserror::Error;

/// Everything that can stop a match before it finishes
#[derive(Debug, Error)]
pub enum GameError {
    /// The player typed the exit token at a prompt.
    #[error("Game exited by user")]
    Exit,

    #[error("Console input closed before the game finished")]
    InputClosed,

    #[error("A match needs at least one round")]
    NoRounds,

    #[error("Invalid match state for this action")]
    InvalidState,

    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl GameError {
    /// True for the ways a player leaves the game on purpose (or by closing input)
    pub fn is_quit(&self) -> bool {
        matches!(self, GameError::Exit | GameError::InputClosed)
    }
}

/// Text that names none of the three moves
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unknown move '{0}'")]
pub struct ParseMoveError(pub String);
