//! Error types for the rules engine.
//!
//! Every rejection is recoverable: the engine validates input and computes
//! push outcomes completely before writing to the board, so a returned error
//! always means the game state is exactly what it was before the call.

use thiserror::Error;

use crate::engine::TurnPhase;
use crate::{Player, Pos};

/// Errors returned by board primitives and engine commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiamError {
    /// Coordinates outside the 5x5 grid.
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfBounds { row: u8, col: u8 },

    /// Tried to place a piece on a non-empty cell.
    #[error("cell {0} is already occupied")]
    CellOccupied(Pos),

    /// Tried to take a piece from an exhausted reserve.
    #[error("{0} has no pieces left in reserve")]
    EmptyReserve(Player),

    /// Cell is empty, holds a rock, or holds an opponent piece.
    #[error("cell {0} does not hold a piece of the current player")]
    NotSelectable(Pos),

    /// Destination is not reachable from the current selection.
    #[error("cell {0} is not a valid destination for the selected piece")]
    IllegalDestination(Pos),

    /// Push blocked: pushing side was not strictly stronger.
    #[error("move blocked: push strength {push} does not beat resistance {resist}")]
    IllegalMove { push: u8, resist: u8 },

    /// Game already has a winner.
    #[error("game is over, {0} won")]
    GameAlreadyOver(Player),

    /// Command issued outside the phase that accepts it.
    #[error("command not accepted in phase {actual:?} (expected {expected})")]
    WrongPhase {
        expected: &'static str,
        actual: TurnPhase,
    },

    /// Unknown direction name.
    #[error("unknown direction {0:?} (expected north, south, east or west)")]
    ParseDirection(String),

    /// Rules configuration failed validation.
    #[error("invalid rules configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for engine operations.
pub type SiamResult<T> = Result<T, SiamError>;
