//! Game status classification.

use chess_core::Color;
use serde::{Deserialize, Serialize};

use crate::movegen::{generate_moves, is_king_attacked};
use crate::Position;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Not in check, with at least one legal move.
    #[default]
    Normal,
    /// In check, with at least one legal move.
    Check,
    /// In check with no legal move. The side to move has lost.
    Checkmate,
    /// Not in check with no legal move. The game is drawn.
    Stalemate,
}

impl GameStatus {
    /// Returns true for checkmate and stalemate.
    #[inline]
    pub fn is_game_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }

    /// Winner, given the side to move in the classified position.
    pub fn winner(self, side_to_move: Color) -> Option<Color> {
        match self {
            GameStatus::Checkmate => Some(side_to_move.opposite()),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Normal => "normal",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        f.write_str(name)
    }
}

/// Classifies the position for the side to move.
pub fn classify(position: &Position) -> GameStatus {
    let in_check = is_king_attacked(position, position.side_to_move());
    let has_moves = !generate_moves(position).is_empty();

    match (in_check, has_moves) {
        (false, true) => GameStatus::Normal,
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
    }
}
