//! Standard chess rules engine.
//!
//! This crate provides:
//! - [`Position`] - Full game state including piece placement, castling rights, etc.
//! - Move generation and validation ([`legal_moves_from`], [`is_legal`], [`generate_moves`])
//! - [`make_move`] / [`unmake_move`] - Copy-make execution with explicit undo records
//! - [`classify`] - Check, checkmate and stalemate detection
//! - [`RuleSet`] - The rules as a trait, implemented by [`StandardChess`]
//! - [`Game`] - A session with history, undo and logging
//!
//! # Architecture
//!
//! The board is a 64-cell mailbox indexed a1 = 0 .. h8 = 63. Legality is
//! layered: per-piece pseudo-legal rules, an attack oracle, and a filter that
//! plays each candidate on a disposable copy and rejects it if the mover's
//! king is left attacked. Castling additionally tests the king's origin,
//! transit and destination squares.
//!
//! Errors a caller can cause are returned as [`RuleError`]. An undo record
//! applied to the wrong position is an engine bug and panics.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Game, GameStatus, StandardChess};
//! use chess_rules::rules::RuleSet;
//!
//! // Using Position directly (stateless)
//! let position = StandardChess.initial_position();
//! let moves = StandardChess.legal_moves(&position);
//! assert_eq!(moves.len(), 20);
//!
//! // Using Game for full game management
//! let mut game = Game::new();
//! game.make_move_uci("e2e4").unwrap();
//! assert_eq!(game.make_move_uci("e7e5").unwrap(), GameStatus::Normal);
//! println!("Position after 1.e4 e5: {}", game.to_fen());
//! ```

mod error;
mod executor;
mod game;
mod history;
pub mod movegen;
mod position;
pub mod rules;
mod status;

pub use error::RuleError;
pub use executor::{make_move, unmake_move, UndoRecord};
pub use game::Game;
pub use history::MoveHistory;
pub use movegen::{
    generate_moves, is_king_attacked, is_legal, is_square_attacked, legal_moves_from,
    pseudo_legal_moves, requires_promotion, MoveKind, MoveList,
};
pub use position::{Cell, Position, PositionError};
pub use rules::{apply, new_game, undo, RuleSet, StandardChess};
pub use status::{classify, GameStatus};
