//! Rule set abstraction.
//!
//! This module provides the [`RuleSet`] trait, the seam hosts program against
//! when they want legality, execution and classification from one value.
//! [`StandardChess`] is the only implementation; the free functions at the
//! bottom of this module are shorthands for it.

mod standard;

pub use standard::StandardChess;

use crate::{GameStatus, MoveList, Position, RuleError, UndoRecord};
use chess_core::{Move, Square};

/// Trait for the rules that govern a game.
///
/// # Example
///
/// ```
/// use chess_rules::rules::RuleSet;
/// use chess_rules::StandardChess;
/// use chess_core::Move;
///
/// let position = StandardChess.initial_position();
/// assert_eq!(StandardChess.legal_moves(&position).len(), 20);
///
/// let (next, record) = StandardChess
///     .apply(&position, Move::from_uci("e2e4").unwrap())
///     .unwrap();
/// assert_eq!(StandardChess.undo(&next, &record), position);
/// ```
pub trait RuleSet {
    /// Returns the initial position.
    fn initial_position(&self) -> Position;

    /// Generates all legal moves for the side to move.
    fn legal_moves(&self, position: &Position) -> MoveList;

    /// Legal moves of the piece on `sq`; empty unless it belongs to the side to move.
    fn legal_moves_from(&self, position: &Position, sq: Square) -> MoveList;

    /// Returns true if the given move is legal in the position.
    fn is_legal(&self, position: &Position, m: Move) -> bool;

    /// Makes a move without checking it.
    ///
    /// # Panics
    ///
    /// May panic if the move is not legal. Use [`apply`](RuleSet::apply) for
    /// moves that have not been validated.
    fn make_move(&self, position: &Position, m: Move) -> (Position, UndoRecord);

    /// Validates and makes a move.
    fn apply(&self, position: &Position, m: Move) -> Result<(Position, UndoRecord), RuleError> {
        if position.is_empty(m.from) {
            return Err(RuleError::NoPieceAtSource(m.from));
        }
        if !self.is_legal(position, m) {
            return Err(RuleError::IllegalMove(m));
        }
        Ok(self.make_move(position, m))
    }

    /// Takes back the move described by `record`.
    fn undo(&self, position: &Position, record: &UndoRecord) -> Position;

    /// Returns true if the side to move is in check.
    fn is_check(&self, position: &Position) -> bool;

    /// Classifies the position for the side to move.
    fn classify(&self, position: &Position) -> GameStatus;

    /// Returns true on checkmate or stalemate.
    fn is_game_over(&self, position: &Position) -> bool {
        self.classify(position).is_game_over()
    }

    /// Returns true if moving `from -> to` is a legal promotion awaiting a piece choice.
    fn requires_promotion(&self, position: &Position, from: Square, to: Square) -> bool;
}

/// The standard starting position.
pub fn new_game() -> Position {
    StandardChess.initial_position()
}

/// Validates and makes a move under standard rules.
pub fn apply(position: &Position, m: Move) -> Result<(Position, UndoRecord), RuleError> {
    StandardChess.apply(position, m)
}

/// Takes back a move under standard rules.
pub fn undo(position: &Position, record: &UndoRecord) -> Position {
    StandardChess.undo(position, record)
}
