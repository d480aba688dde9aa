//! Chess position representation.

use chess_core::{CastlingRights, Color, Fen, FenError, Piece, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::movegen::is_king_attacked;

/// Contents of one board cell.
pub type Cell = Option<(Piece, Color)>;

/// Reasons a piece placement cannot be used as a position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("expected 64 board cells, got {0}")]
    BoardSize(usize),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),

    #[error("en passant square {0} does not follow a two-square pawn advance")]
    InvalidEnPassant(Square),
}

/// Complete chess position state.
///
/// Values are only produced by [`Position::startpos`], [`Position::from_fen`],
/// deserialization (which validates), and the move executor, so the board
/// always holds exactly one king per color and `king_squares` always points
/// at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PositionData", into = "PositionData")]
pub struct Position {
    /// Cells indexed by [`Square::index`].
    pub(crate) board: [Cell; 64],

    /// The side to move.
    pub(crate) side_to_move: Color,

    /// Castling rights.
    pub(crate) castling: CastlingRights,

    /// En passant target square (if any).
    pub(crate) en_passant: Option<Square>,

    /// King location per color, indexed by [`Color::index`].
    pub(crate) king_squares: [Square; 2],

    /// Plies since the last pawn move or capture. Carried for FEN only.
    pub(crate) halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let fen = Fen::startpos();
        Position {
            board: fen.board,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            king_squares: [Square::E1, Square::E8],
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Self::from_fen_record(Fen::parse(fen)?)
    }

    /// Validates a parsed FEN record and builds a position from it.
    pub fn from_fen_record(fen: Fen) -> Result<Self, PositionError> {
        let mut king_squares = [Square::E1, Square::E8];
        let mut king_counts = [0usize; 2];

        for sq in Square::all() {
            match fen.board[sq.index() as usize] {
                Some((Piece::King, color)) => {
                    king_squares[color.index()] = sq;
                    king_counts[color.index()] += 1;
                }
                Some((Piece::Pawn, _)) if sq.rank() == 0 || sq.rank() == 7 => {
                    return Err(PositionError::PawnOnBackRank(sq));
                }
                _ => {}
            }
        }
        for color in Color::ALL {
            let count = king_counts[color.index()];
            if count != 1 {
                return Err(PositionError::KingCount { color, count });
            }
        }

        let position = Position {
            board: fen.board,
            side_to_move: fen.side_to_move,
            castling: fen.castling,
            en_passant: fen.en_passant,
            king_squares,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        };

        if let Some(target) = position.en_passant {
            if !position.en_passant_is_consistent(target) {
                return Err(PositionError::InvalidEnPassant(target));
            }
        }

        let waiting = position.side_to_move.opposite();
        if is_king_attacked(&position, waiting) {
            return Err(PositionError::OpponentInCheck(waiting));
        }

        Ok(position)
    }

    /// The target must be the empty square an opponent pawn just skipped,
    /// with that pawn in front of it and its starting square empty.
    fn en_passant_is_consistent(&self, target: Square) -> bool {
        let them = self.side_to_move.opposite();
        let dir = them.pawn_direction();
        self.is_empty(target)
            && target
                .offset(dir, 0)
                .is_some_and(|sq| self.piece_at(sq) == Some((Piece::Pawn, them)))
            && target
                .offset(-dir, 0)
                .is_some_and(|from| from.rank() == them.pawn_rank() && self.is_empty(from))
    }

    /// Returns the FEN record describing this position.
    pub fn to_fen_record(&self) -> Fen {
        Fen {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_fen_record().to_string()
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Cell {
        self.board[sq.index() as usize]
    }

    /// Returns true if no piece stands on `sq`.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Returns the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(_, color)| color)
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Remaining castling rights.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Square a pawn may capture onto en passant this ply.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Square of the given color's king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Iterates the squares and kinds of all pieces of `color`.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some((piece, c)) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Counts pieces of the given kind and color.
    pub fn count(&self, piece: Piece, color: Color) -> usize {
        self.pieces(color).filter(|&(_, p)| p == piece).count()
    }

    /// Places a piece, keeping the king cache in sync.
    #[inline]
    pub(crate) fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        self.board[sq.index() as usize] = Some((piece, color));
        if piece == Piece::King {
            self.king_squares[color.index()] = sq;
        }
    }

    /// Empties a square, returning what stood there.
    #[inline]
    pub(crate) fn take(&mut self, sq: Square) -> Cell {
        self.board[sq.index() as usize].take()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Serialized shape of a [`Position`].
///
/// The king cache is not stored; it is rebuilt and checked on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PositionData {
    board: Vec<Cell>,
    side_to_move: Color,
    castling: CastlingRights,
    #[serde(default)]
    en_passant: Option<Square>,
    #[serde(default)]
    halfmove_clock: u32,
    #[serde(default = "first_move")]
    fullmove_number: u32,
}

fn first_move() -> u32 {
    1
}

impl From<Position> for PositionData {
    fn from(p: Position) -> Self {
        PositionData {
            board: p.board.to_vec(),
            side_to_move: p.side_to_move,
            castling: p.castling,
            en_passant: p.en_passant,
            halfmove_clock: p.halfmove_clock,
            fullmove_number: p.fullmove_number,
        }
    }
}

impl TryFrom<PositionData> for Position {
    type Error = PositionError;

    fn try_from(data: PositionData) -> Result<Self, Self::Error> {
        let len = data.board.len();
        let board: [Cell; 64] = data
            .board
            .try_into()
            .map_err(|_| PositionError::BoardSize(len))?;
        Position::from_fen_record(Fen {
            board,
            side_to_move: data.side_to_move,
            castling: data.castling,
            en_passant: data.en_passant,
            halfmove_clock: data.halfmove_clock,
            fullmove_number: data.fullmove_number,
        })
    }
}
