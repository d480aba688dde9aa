//! Errors reported to callers of the rules engine.
//!
//! Every variant is a caller-input error: the engine state is untouched and
//! the caller may simply try again with different input. A corrupted engine
//! state (for example an undo record that does not belong to the position it
//! is applied to) is not represented here; it panics.

use chess_core::{Move, Square, SquareError};
use thiserror::Error;

use crate::position::PositionError;

/// Error type for rules-engine operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    /// Coordinates outside the board, or a malformed square name.
    #[error(transparent)]
    InvalidSquare(#[from] SquareError),

    /// The move fails a legality check in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    /// The source square of the move is empty.
    #[error("no piece on {0}")]
    NoPieceAtSource(Square),

    /// Undo was requested with no move played.
    #[error("no move to undo")]
    EmptyHistory,

    /// A move string that is not UCI coordinate notation.
    #[error("invalid UCI move: '{0}'")]
    InvalidUci(String),

    /// A position that cannot occur in play.
    #[error(transparent)]
    InvalidPosition(#[from] PositionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let e1 = Square::E1;
        let e3 = Square::from_algebraic("e3").unwrap();
        assert_eq!(
            RuleError::IllegalMove(Move::normal(e1, e3)).to_string(),
            "illegal move: e1e3"
        );
        assert_eq!(RuleError::NoPieceAtSource(e3).to_string(), "no piece on e3");
        assert_eq!(RuleError::EmptyHistory.to_string(), "no move to undo");
    }

    #[test]
    fn square_errors_convert() {
        let err: RuleError = Square::new(9, 0).unwrap_err().into();
        assert!(matches!(err, RuleError::InvalidSquare(_)));
        assert!(err.to_string().contains("rank 9"));
    }
}
