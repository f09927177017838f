//! Error types for the rules engine.
//!
//! [`MoveError`] is what a move source gets back when a submission is
//! refused; the game state is untouched and the turn is requested again.
//! [`StateError`] means the board and registry no longer agree, which is
//! an engine defect. Callers should stop the game rather than continue.

use thiserror::Error;

use crate::types::{Color, Square};

/// Rejections reported back to the move source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("unknown piece identifier: {0}")]
    UnknownPieceIdentifier(String),

    #[error("{piece} cannot move to {to}")]
    IllegalDestination { piece: String, to: Square },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("the game is already over")]
    GameOver,

    /// The source can no longer produce moves (closed input, no options left).
    #[error("move source exhausted")]
    SourceExhausted,
}

/// Invariant violations. These should never happen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("undo requested with an empty move history")]
    HistoryUnderflow,

    #[error("inconsistent board state: {0}")]
    InconsistentState(String),
}

/// Problems building a position from a description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("square {0} is occupied twice")]
    DuplicateSquare(Square),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    /// The side that just moved would still be in check.
    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),

    #[error("kings on {0} and {1} stand next to each other")]
    AdjacentKings(Square, Square),
}

/// Errors out of [`Game`](crate::game::Game).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Rejected(#[from] MoveError),

    #[error(transparent)]
    Fatal(#[from] StateError),

    #[error("gave up after {0} rejected submissions")]
    RejectionLimit(u32),
}
