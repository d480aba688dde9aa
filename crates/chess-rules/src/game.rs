//! Game session with history tracking.
//!
//! The [`Game`] struct owns one live position and the undo stack that led to
//! it. Every entry point validates its input and leaves the session untouched
//! on error, so a host can surface the error and let the player try again.

use chess_core::{Color, Move, Piece, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::rules::{RuleSet, StandardChess};
use crate::{GameStatus, MoveHistory, MoveList, Position, RuleError, UndoRecord};

/// A chess game: current position, starting position and move history.
///
/// Snapshots serialize the starting position and the undo stack. Loading a
/// snapshot replays the stack, so a tampered history is rejected rather than
/// producing a position the rules could not reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameData", into = "GameData")]
pub struct Game {
    /// Current position.
    position: Position,
    /// Undo records for every move played, oldest first.
    history: MoveHistory,
    /// Starting position.
    start_pos: Position,
    /// Status of the current position, refreshed after every change.
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        Self::from_position(StandardChess.initial_position())
    }

    /// Creates a game from a custom starting position.
    pub fn from_position(position: Position) -> Self {
        let status = StandardChess.classify(&position);
        Game {
            start_pos: position.clone(),
            position,
            history: MoveHistory::new(),
            status,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, RuleError> {
        let position = Position::from_fen(fen)?;
        Ok(Self::from_position(position))
    }

    /// Returns a reference to the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the starting position.
    pub fn start_position(&self) -> &Position {
        &self.start_pos
    }

    /// Status of the side to move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Returns true on checkmate or stalemate.
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// The side that delivered mate, if any.
    pub fn winner(&self) -> Option<Color> {
        self.status.winner(self.position.side_to_move())
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> MoveList {
        StandardChess.legal_moves(&self.position)
    }

    /// Legal moves of the piece on `sq`.
    pub fn legal_moves_from(&self, sq: Square) -> MoveList {
        StandardChess.legal_moves_from(&self.position, sq)
    }

    /// Returns true if `m` is legal in the current position.
    pub fn is_legal(&self, m: Move) -> bool {
        StandardChess.is_legal(&self.position, m)
    }

    /// Returns true if `from -> to` is a legal pawn move that needs a promotion choice.
    pub fn requires_promotion(&self, from: Square, to: Square) -> bool {
        StandardChess.requires_promotion(&self.position, from, to)
    }

    /// Returns the move history.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Moves played so far, in order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|record| record.mov)
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Makes a move and returns the status that follows.
    ///
    /// A promoting pawn move without a promotion kind promotes to a queen.
    /// Moves are accepted after the game is over only if they are legal,
    /// which after mate or stalemate none are.
    pub fn make_move(&mut self, m: Move) -> Result<GameStatus, RuleError> {
        let (next, record) = StandardChess.apply(&self.position, m).inspect_err(|e| {
            trace!(%m, error = %e, "move rejected");
        })?;

        debug!(mov = %record.mov, ply = self.history.len() + 1, "move applied");
        self.position = next;
        self.history.push(record);
        self.refresh_status();
        Ok(self.status)
    }

    /// Makes a move given in UCI notation (`e2e4`, `e7e8n`).
    pub fn make_move_uci(&mut self, uci: &str) -> Result<GameStatus, RuleError> {
        let m = Move::from_uci(uci).ok_or_else(|| RuleError::InvalidUci(uci.to_string()))?;
        self.make_move(m)
    }

    /// Makes a move given as `(rank, file)` pairs, each in `0..8`.
    pub fn make_move_coords(
        &mut self,
        from: (u8, u8),
        to: (u8, u8),
        promotion: Option<Piece>,
    ) -> Result<GameStatus, RuleError> {
        let m = Move::from_coords(from, to)?;
        let m = match promotion {
            Some(piece) => m.with_promotion(piece),
            None => m,
        };
        self.make_move(m)
    }

    /// Takes back the last move, returning its record.
    pub fn undo(&mut self) -> Result<UndoRecord, RuleError> {
        let record = self.history.pop().ok_or(RuleError::EmptyHistory)?;
        self.position = StandardChess.undo(&self.position, &record);
        debug!(mov = %record.mov, ply = self.history.len(), "move undone");
        self.refresh_status();
        Ok(record)
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    fn refresh_status(&mut self) {
        self.status = StandardChess.classify(&self.position);
        if self.status.is_game_over() {
            info!(
                status = %self.status,
                winner = ?self.winner(),
                plies = self.history.len(),
                "game over"
            );
        }
    }
}

/// Serialized shape of a [`Game`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameData {
    start: Position,
    #[serde(default)]
    history: MoveHistory,
}

impl From<Game> for GameData {
    fn from(game: Game) -> Self {
        GameData {
            start: game.start_pos,
            history: game.history,
        }
    }
}

impl TryFrom<GameData> for Game {
    type Error = RuleError;

    fn try_from(data: GameData) -> Result<Self, Self::Error> {
        let mut game = Game::from_position(data.start);
        for stored in data.history.iter() {
            game.make_move(stored.mov)?;
            if game.history.last() != Some(stored) {
                return Err(RuleError::IllegalMove(stored.mov));
            }
        }
        Ok(game)
    }
}
