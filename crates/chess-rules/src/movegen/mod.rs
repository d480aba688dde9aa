//! Move generation and legality.
//!
//! Generation is layered: [`pseudo_legal_moves`] knows how each piece moves,
//! [`is_square_attacked`] knows which squares a side controls, and the
//! functions here combine them into legal moves. Checks run against disposable
//! copies of the position; the caller's position is never touched.

mod attacks;
pub mod perft;
mod pseudo;

use crate::executor::make_move;
use crate::Position;
use chess_core::{CastleSide, Color, Move, Piece, Square};
use serde::{Deserialize, Serialize};

pub use attacks::{is_king_attacked, is_square_attacked};
pub use pseudo::pseudo_legal_moves;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation. A generated list
/// never holds the same move twice.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    const FILLER: Move = Move::normal(Square::A1, Square::A1);

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Self::FILLER; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates the moves in generation order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds `m`.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Destination squares, one per target even when several promotions share it.
    pub fn destinations(&self) -> Vec<Square> {
        let mut out: Vec<Square> = self.iter().map(|m| m.to).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    /// Appends every move of `other`.
    pub fn append(&mut self, other: &MoveList) {
        for &m in other {
            self.push(m);
        }
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// What a move does beyond relocating one piece, derived from the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Plain move or ordinary capture (promotions included).
    Normal,
    /// Pawn advance of two squares from its starting rank.
    DoublePush,
    /// Pawn capture onto the en passant target square.
    EnPassant,
    /// King's two-square castling move.
    Castle(CastleSide),
}

/// Classifies `m` in `position`, or returns `None` if `m.from` is empty.
///
/// The move is assumed to be pseudo-legal; the kind is read from geometry.
pub fn move_kind(position: &Position, m: Move) -> Option<MoveKind> {
    let (piece, color) = position.piece_at(m.from)?;
    let kind = match piece {
        Piece::King if m.from == CastleSide::king_origin(color) => CastleSide::ALL
            .into_iter()
            .find(|side| side.king_target(color) == m.to)
            .map_or(MoveKind::Normal, MoveKind::Castle),
        Piece::Pawn if m.from.rank().abs_diff(m.to.rank()) == 2 => MoveKind::DoublePush,
        Piece::Pawn
            if m.from.file() != m.to.file()
                && position.en_passant() == Some(m.to)
                && position.is_empty(m.to) =>
        {
            MoveKind::EnPassant
        }
        _ => MoveKind::Normal,
    };
    Some(kind)
}

/// Returns true if `m` moves a pawn onto its promotion rank.
pub fn is_promotion(position: &Position, m: Move) -> bool {
    matches!(
        position.piece_at(m.from),
        Some((Piece::Pawn, color)) if m.to.rank() == color.promotion_rank()
    )
}

/// Fills in the default promotion kind (queen) for a pawn reaching the far rank.
pub fn normalize(position: &Position, m: Move) -> Move {
    if m.promotion.is_none() && is_promotion(position, m) {
        m.with_promotion(Piece::Queen)
    } else {
        m
    }
}

/// Returns true if `m` is legal for the side to move.
///
/// A missing promotion kind on a promoting pawn move is read as a queen.
pub fn is_legal(position: &Position, m: Move) -> bool {
    let us = position.side_to_move();
    if position.color_at(m.from) != Some(us) {
        return false;
    }
    let m = normalize(position, m);
    pseudo_legal_moves(position, m.from).contains(&m) && keeps_king_safe(position, m, us)
}

/// Final legality step for a pseudo-legal move of side `us`.
fn keeps_king_safe(position: &Position, m: Move, us: Color) -> bool {
    match move_kind(position, m) {
        Some(MoveKind::Castle(side)) => castling_path_is_safe(position, side, us),
        _ => {
            let (next, _) = make_move(position, m);
            !is_king_attacked(&next, us)
        }
    }
}

/// The king may not castle out of, through, or into an attacked square.
///
/// Each square is tested with the king actually standing on it, so a ray the
/// king itself would otherwise block is seen.
fn castling_path_is_safe(position: &Position, side: CastleSide, us: Color) -> bool {
    let them = us.opposite();
    let origin = CastleSide::king_origin(us);
    if is_square_attacked(position, origin, them) {
        return false;
    }

    [side.rook_target(us), side.king_target(us)]
        .into_iter()
        .all(|sq| {
            let mut hypothetical = position.clone();
            hypothetical.take(origin);
            hypothetical.put(sq, Piece::King, us);
            !is_square_attacked(&hypothetical, sq, them)
        })
}

/// Returns the legal moves of the piece on `sq`.
///
/// Empty squares and pieces of the side not to move yield an empty list.
pub fn legal_moves_from(position: &Position, sq: Square) -> MoveList {
    let us = position.side_to_move();
    if position.color_at(sq) != Some(us) {
        return MoveList::new();
    }
    let mut moves = pseudo_legal_moves(position, sq);
    moves.retain(|m| keeps_king_safe(position, *m, us));
    moves
}

/// Generates all legal moves for the given position.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    for (sq, _) in position.pieces(position.side_to_move()) {
        moves.append(&legal_moves_from(position, sq));
    }
    moves
}

/// Returns true if the pawn move `from -> to` is legal and needs a promotion choice.
///
/// Hosts ask this before committing a move so they can collect the piece
/// kind first, then submit the move with `promotion` filled in.
pub fn requires_promotion(position: &Position, from: Square, to: Square) -> bool {
    let m = Move::normal(from, to);
    is_promotion(position, m) && is_legal(position, m)
}
