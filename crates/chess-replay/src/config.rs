//! Game file loading for the replay tool.
//!
//! A game file is TOML naming an optional starting position and the moves to
//! play from it in UCI notation:
//!
//! ```toml
//! start_fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"
//! moves = ["e1g1", "e8c8"]
//! ```

use chess_rules::{Game, Position, PositionError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a game file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the game file from disk.
    #[error("Failed to read game file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the game file as valid TOML.
    #[error("Failed to parse game file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The `start_fen` entry is not a playable position.
    #[error("Invalid start_fen: {0}")]
    InvalidStart(#[from] PositionError),
}

/// A recorded game to replay.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct GameFile {
    /// Starting position in FEN. Defaults to the standard start.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Moves in UCI notation, played in order.
    #[serde(default)]
    pub moves: Vec<String>,
}

impl GameFile {
    /// Loads a game file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it is not valid TOML of the expected shape.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a game file from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Creates a session at the starting position, before any move is played.
    pub fn new_game(&self) -> Result<Game, ConfigError> {
        match &self.start_fen {
            Some(fen) => Ok(Game::from_position(Position::from_fen(fen)?)),
            None => Ok(Game::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;

    #[test]
    fn test_parse_full_game_file() {
        let file = GameFile::parse(
            r#"
start_fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1"
moves = ["a7a8n", "e8e7"]
"#,
        )
        .unwrap();

        assert_eq!(file.start_fen.as_deref(), Some("4k3/P7/8/8/8/8/8/4K3 w - - 0 1"));
        assert_eq!(file.moves, ["a7a8n", "e8e7"]);
        let game = file.new_game().unwrap();
        assert_eq!(game.to_fen(), "4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn test_defaults_to_standard_start() {
        let file = GameFile::parse(r#"moves = ["e2e4"]"#).unwrap();
        assert_eq!(file.start_fen, None);
        assert_eq!(file.new_game().unwrap().to_fen(), Fen::STARTPOS);

        let empty = GameFile::parse("").unwrap();
        assert_eq!(empty, GameFile::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = GameFile::parse("moves = [e2e4");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));

        let result = GameFile::parse("moves = \"e2e4\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_start_fen() {
        let file = GameFile {
            start_fen: Some("8/8/8/8/8/8/8/8 w - - 0 1".to_string()),
            moves: Vec::new(),
        };
        let err = file.new_game().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStart(_)));
        assert!(err.to_string().starts_with("Invalid start_fen"));
    }

    #[test]
    fn test_missing_file() {
        let result = GameFile::load(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
