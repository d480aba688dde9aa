//! Pseudo-legal move generation.
//!
//! Moves produced here follow each piece's movement rules and never land on a
//! friendly piece, but may leave the mover's own king attacked. Castling is
//! produced when the right is held and the path is clear; the attack checks
//! that complete it live in the legality filter.

use super::attacks::{first_blocker, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};
use super::MoveList;
use crate::Position;
use chess_core::{CastleSide, Color, Move, Piece, Square};

/// Generates pseudo-legal moves for the piece on `from`.
///
/// An empty square yields an empty list. Pawn moves reaching the far rank are
/// produced once per promotion kind.
pub fn pseudo_legal_moves(position: &Position, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some((piece, color)) = position.piece_at(from) else {
        return moves;
    };

    match piece {
        Piece::Pawn => generate_pawn_moves(position, from, color, &mut moves),
        Piece::Knight => generate_step_moves(position, from, color, &KNIGHT_OFFSETS, &mut moves),
        Piece::Bishop => generate_slider_moves(position, from, color, &DIAGONALS, &mut moves),
        Piece::Rook => generate_slider_moves(position, from, color, &ORTHOGONALS, &mut moves),
        Piece::Queen => {
            generate_slider_moves(position, from, color, &ORTHOGONALS, &mut moves);
            generate_slider_moves(position, from, color, &DIAGONALS, &mut moves);
        }
        Piece::King => {
            generate_step_moves(position, from, color, &KING_OFFSETS, &mut moves);
            generate_castling_moves(position, from, color, &mut moves);
        }
    }

    moves
}

/// Pushes a pawn move, expanding it into every promotion when it reaches the far rank.
fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut MoveList) {
    if to.rank() == color.promotion_rank() {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::promoting(from, to, piece));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}

fn generate_pawn_moves(position: &Position, from: Square, color: Color, moves: &mut MoveList) {
    let dir = color.pawn_direction();

    // Pushes
    if let Some(one) = from.offset(dir, 0).filter(|&sq| position.is_empty(sq)) {
        push_pawn_move(from, one, color, moves);
        if from.rank() == color.pawn_rank() {
            if let Some(two) = one.offset(dir, 0).filter(|&sq| position.is_empty(sq)) {
                moves.push(Move::normal(from, two));
            }
        }
    }

    // Captures, including en passant onto the empty target square
    for df in [-1, 1] {
        let Some(to) = from.offset(dir, df) else {
            continue;
        };
        match position.color_at(to) {
            Some(c) if c != color => push_pawn_move(from, to, color, moves),
            None if position.en_passant() == Some(to)
                && position.side_to_move() == color
                && position.piece_at(to.with_rank(from.rank()))
                    == Some((Piece::Pawn, color.opposite())) =>
            {
                moves.push(Move::normal(from, to));
            }
            _ => {}
        }
    }
}

/// Knight and king steps: each offset once, onto empty or enemy squares.
fn generate_step_moves(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, df) in offsets {
        if let Some(to) = from.offset(dr, df) {
            if position.color_at(to) != Some(color) {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

/// Sliding moves: every empty square along each ray, plus the first piece if it is an enemy.
fn generate_slider_moves(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, df) in directions {
        let blocker = first_blocker(position, from, (dr, df));
        let mut sq = from;
        while let Some(to) = sq.offset(dr, df) {
            match blocker {
                Some((stop, _, c)) if stop == to => {
                    if c != color {
                        moves.push(Move::normal(from, to));
                    }
                    break;
                }
                _ => moves.push(Move::normal(from, to)),
            }
            sq = to;
        }
    }
}

/// Castling as a two-square king move, when the right is held and the path is empty.
fn generate_castling_moves(position: &Position, from: Square, color: Color, moves: &mut MoveList) {
    if from != CastleSide::king_origin(color) {
        return;
    }

    for side in CastleSide::ALL {
        if !position.castling().has(color, side) {
            continue;
        }
        if position.piece_at(side.rook_origin(color)) != Some((Piece::Rook, color)) {
            continue;
        }
        let rank = color.back_rank();
        let path_clear = side.between_files().all(|file| {
            Square::new(rank, file).is_ok_and(|sq| position.is_empty(sq))
        });
        if path_clear {
            moves.push(Move::normal(from, side.king_target(color)));
        }
    }
}
