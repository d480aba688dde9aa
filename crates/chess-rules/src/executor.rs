//! Applying and reverting moves.
//!
//! [`make_move`] is copy-make: it returns a fresh [`Position`] together with an
//! [`UndoRecord`] holding everything [`unmake_move`] needs to restore the
//! earlier position without diffing boards.

use chess_core::{CastleSide, CastlingRights, Color, Move, Piece, Square};
use serde::{Deserialize, Serialize};

use crate::movegen::{is_promotion, move_kind, normalize, MoveKind};
use crate::Position;

/// Everything needed to take back one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRecord {
    /// The move as executed, with any default promotion filled in.
    pub mov: Move,
    /// Kind of the piece that moved, as it stood on `from`.
    pub moved: Piece,
    pub kind: MoveKind,
    /// Captured piece and the square it stood on (not `to` for en passant).
    pub captured: Option<(Piece, Square)>,
    /// True if a pawn was replaced by `mov.promotion`.
    pub promoted: bool,
    pub prev_castling: CastlingRights,
    pub prev_en_passant: Option<Square>,
    pub prev_halfmove_clock: u32,
    pub prev_fullmove_number: u32,
}

/// Makes a move and returns the new position with its undo record.
///
/// The move must be legal in `position`; this is not re-checked. Use
/// [`crate::is_legal`] or [`crate::apply`] to gate untrusted moves.
///
/// # Panics
///
/// Panics if `m.from` is empty.
pub fn make_move(position: &Position, m: Move) -> (Position, UndoRecord) {
    let Some((piece, us)) = position.piece_at(m.from) else {
        panic!("make_move: no piece on {} for {}", m.from, m);
    };
    let them = us.opposite();
    let m = normalize(position, m);
    let kind = move_kind(position, m).unwrap_or(MoveKind::Normal);
    let promoted = is_promotion(position, m);

    let mut next = position.clone();

    // Captures
    let captured_sq = match kind {
        MoveKind::EnPassant => m.to.with_rank(m.from.rank()),
        _ => m.to,
    };
    let captured = match next.take(captured_sq) {
        Some((victim, color)) if color == them => Some((victim, captured_sq)),
        Some(own) => panic!("make_move: {} lands on own piece {:?}", m, own),
        None => None,
    };

    // Relocate the mover, replacing a promoting pawn
    next.take(m.from);
    let placed = match m.promotion {
        Some(promotion) if promoted => promotion,
        _ => piece,
    };
    next.put(m.to, placed, us);

    if let MoveKind::Castle(side) = kind {
        next.take(side.rook_origin(us));
        next.put(side.rook_target(us), Piece::Rook, us);
    }

    // Castling rights
    if piece == Piece::King {
        next.castling.remove_color(us);
    }
    for sq in [m.from, m.to] {
        // Anything leaving or landing on an original rook corner ends that wing's right.
        if let Some((color, side)) = CastleSide::from_rook_origin(sq) {
            next.castling.remove(color, side);
        }
    }

    next.en_passant = match kind {
        MoveKind::DoublePush => Some(m.from.with_rank((m.from.rank() + m.to.rank()) / 2)),
        _ => None,
    };

    if piece == Piece::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }
    if us == Color::Black {
        next.fullmove_number += 1;
    }

    next.side_to_move = them;

    let record = UndoRecord {
        mov: m,
        moved: piece,
        kind,
        captured,
        promoted,
        prev_castling: position.castling,
        prev_en_passant: position.en_passant,
        prev_halfmove_clock: position.halfmove_clock,
        prev_fullmove_number: position.fullmove_number,
    };

    (next, record)
}

/// Reverts a move, returning the position it was made from.
///
/// # Panics
///
/// Panics if `record` was not produced by [`make_move`] on the position that
/// led to `position`. That indicates corrupted engine state, not bad input.
pub fn unmake_move(position: &Position, record: &UndoRecord) -> Position {
    let mover = position.side_to_move.opposite();
    let m = record.mov;
    let mut prev = position.clone();

    let expected = if record.promoted {
        m.promotion.unwrap_or(Piece::Queen)
    } else {
        record.moved
    };
    match prev.take(m.to) {
        Some((piece, color)) if piece == expected && color == mover => {}
        found => panic!(
            "unmake_move: expected {} {} on {} for {}, found {:?}",
            mover, expected, m.to, m, found
        ),
    }
    prev.put(m.from, record.moved, mover);

    if let MoveKind::Castle(side) = record.kind {
        match prev.take(side.rook_target(mover)) {
            Some((Piece::Rook, color)) if color == mover => {}
            found => panic!(
                "unmake_move: castling rook missing from {}, found {:?}",
                side.rook_target(mover),
                found
            ),
        }
        prev.put(side.rook_origin(mover), Piece::Rook, mover);
    }

    if let Some((victim, sq)) = record.captured {
        prev.put(sq, victim, mover.opposite());
    }

    prev.castling = record.prev_castling;
    prev.en_passant = record.prev_en_passant;
    prev.halfmove_clock = record.prev_halfmove_clock;
    prev.fullmove_number = record.prev_fullmove_number;
    prev.side_to_move = mover;

    prev
}
