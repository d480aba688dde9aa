//! Move representation.

use crate::{Piece, Square, SquareError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chess move as a caller expresses it: two squares and an optional promotion kind.
///
/// Castling is written as the king's two-square step (`e1g1`). Whether a move
/// is a double push, en passant capture, castle, or promotion is derived from
/// the position it is played in, not stored here.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Piece>,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, promotion: Option<Piece>) -> Self {
        Move {
            from,
            to,
            promotion,
        }
    }

    /// Creates a move without a promotion kind.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, None)
    }

    /// Creates a promoting move.
    #[inline]
    pub const fn promoting(from: Square, to: Square, piece: Piece) -> Self {
        Self::new(from, to, Some(piece))
    }

    /// Creates a move from raw (rank, file) coordinates.
    pub fn from_coords(from: (u8, u8), to: (u8, u8)) -> Result<Self, SquareError> {
        Ok(Self::normal(
            Square::new(from.0, from.1)?,
            Square::new(to.0, to.1)?,
        ))
    }

    /// Returns the same squares with the given promotion kind.
    #[inline]
    pub const fn with_promotion(self, piece: Piece) -> Self {
        Self::new(self.from, self.to, Some(piece))
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from UCI notation.
    ///
    /// Only the syntax is checked; legality is decided against a position.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s.chars().nth(4) {
            Some(c) => Some(Piece::from_char(c).filter(|p| p.is_promotion_target())?),
            None => None,
        };
        Some(Move::new(from, to, promotion))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
