//! Standard chess rules implementation.

use super::RuleSet;
use crate::{executor, movegen, status, GameStatus, MoveList, Position, UndoRecord};
use chess_core::{Move, Square};

/// Standard chess rules (FIDE).
///
/// Covers piece movement, castling, en passant, promotion, check, checkmate
/// and stalemate. Draw rules based on clocks, repetition or material are not
/// adjudicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChess;

impl RuleSet for StandardChess {
    fn initial_position(&self) -> Position {
        Position::startpos()
    }

    fn legal_moves(&self, position: &Position) -> MoveList {
        movegen::generate_moves(position)
    }

    fn legal_moves_from(&self, position: &Position, sq: Square) -> MoveList {
        movegen::legal_moves_from(position, sq)
    }

    fn is_legal(&self, position: &Position, m: Move) -> bool {
        movegen::is_legal(position, m)
    }

    fn make_move(&self, position: &Position, m: Move) -> (Position, UndoRecord) {
        executor::make_move(position, m)
    }

    fn undo(&self, position: &Position, record: &UndoRecord) -> Position {
        executor::unmake_move(position, record)
    }

    fn is_check(&self, position: &Position) -> bool {
        movegen::is_king_attacked(position, position.side_to_move())
    }

    fn classify(&self, position: &Position) -> GameStatus {
        status::classify(position)
    }

    fn requires_promotion(&self, position: &Position, from: Square, to: Square) -> bool {
        movegen::requires_promotion(position, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{apply, new_game, undo};
    use crate::RuleError;
    use chess_core::Fen;

    fn mv(uci: &str) -> Move {
        Move::from_uci(uci).unwrap()
    }

    #[test]
    fn initial_position() {
        let pos = StandardChess.initial_position();
        assert_eq!(pos.to_fen(), Fen::STARTPOS);
        assert_eq!(StandardChess.legal_moves(&pos).len(), 20);
        assert!(!StandardChess.is_check(&pos));
        assert!(!StandardChess.is_game_over(&pos));
    }

    #[test]
    fn apply_rejects_empty_source() {
        let pos = StandardChess.initial_position();
        assert_eq!(
            StandardChess.apply(&pos, mv("e4e5")),
            Err(RuleError::NoPieceAtSource(Square::from_algebraic("e4").unwrap()))
        );
    }

    #[test]
    fn apply_rejects_illegal_move() {
        let pos = StandardChess.initial_position();
        assert_eq!(
            StandardChess.apply(&pos, mv("e2e5")),
            Err(RuleError::IllegalMove(mv("e2e5")))
        );
        // Right piece shape, wrong side to move.
        assert_eq!(
            StandardChess.apply(&pos, mv("e7e5")),
            Err(RuleError::IllegalMove(mv("e7e5")))
        );
    }

    #[test]
    fn apply_then_undo() {
        let pos = StandardChess.initial_position();
        let (next, record) = StandardChess.apply(&pos, mv("g1f3")).unwrap();
        assert_ne!(next, pos);
        assert_eq!(StandardChess.undo(&next, &record), pos);
    }

    #[test]
    fn free_functions_match_trait() {
        let pos = new_game();
        let (next, record) = apply(&pos, mv("d2d4")).unwrap();
        assert_eq!(undo(&next, &record), pos);
    }
}
