//! Square attack detection.
//!
//! Attacks are found by looking outwards from the target square: a knight
//! offset that lands on an enemy knight, a ray whose first piece is an enemy
//! slider of the right kind, and so on. Pawns attack diagonally forward
//! whether or not the square is occupied, and en passant is never consulted.

use crate::Position;
use chess_core::{Color, Piece, Square};

/// Knight jump offsets as (rank, file) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// King step offsets as (rank, file) deltas.
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Rook ray directions.
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Bishop ray directions.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Returns the first occupied square along a ray from `from`, exclusive.
pub(crate) fn first_blocker(
    position: &Position,
    from: Square,
    (dr, df): (i8, i8),
) -> Option<(Square, Piece, Color)> {
    let mut sq = from;
    while let Some(next) = sq.offset(dr, df) {
        if let Some((piece, color)) = position.piece_at(next) {
            return Some((next, piece, color));
        }
        sq = next;
    }
    None
}

/// Returns true if the given square is attacked by the given color.
pub fn is_square_attacked(position: &Position, sq: Square, by_color: Color) -> bool {
    let holds = |target: Option<Square>, piece: Piece| {
        target.is_some_and(|t| position.piece_at(t) == Some((piece, by_color)))
    };

    // An attacking pawn stands one rank behind the target, from its own point of view.
    let back = -by_color.pawn_direction();
    if holds(sq.offset(back, -1), Piece::Pawn) || holds(sq.offset(back, 1), Piece::Pawn) {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, df)| holds(sq.offset(dr, df), Piece::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(dr, df)| holds(sq.offset(dr, df), Piece::King))
    {
        return true;
    }

    let slider_hit = |dirs: &[(i8, i8)], kind: Piece| {
        dirs.iter().any(|&dir| {
            matches!(
                first_blocker(position, sq, dir),
                Some((_, piece, color)) if color == by_color && (piece == kind || piece == Piece::Queen)
            )
        })
    };

    slider_hit(&ORTHOGONALS, Piece::Rook) || slider_hit(&DIAGONALS, Piece::Bishop)
}

/// Returns true if the king of the given color is in check.
#[inline]
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    is_square_attacked(
        position,
        position.king_square(king_color),
        king_color.opposite(),
    )
}
