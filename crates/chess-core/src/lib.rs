//! Core types for chess.
//!
//! This crate provides the vocabulary shared by the rules engine and its hosts:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates
//! - [`Move`] for caller-supplied moves
//! - [`CastlingRights`] and [`CastleSide`]
//! - [`Fen`] parsing and serialization

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::Move;
pub use piece::Piece;
pub use square::{Square, SquareError};
