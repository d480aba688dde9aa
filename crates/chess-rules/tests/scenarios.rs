//! Game scenarios played through the public API.

use chess_core::{CastleSide, Color, Move, Piece, Square};
use chess_rules::{
    classify, is_legal, legal_moves_from, Game, GameStatus, Position, PositionError, RuleError,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(game: &mut Game, moves: &[&str]) {
    for uci in moves {
        game.make_move_uci(uci)
            .unwrap_or_else(|e| panic!("{uci} rejected in {}: {e}", game.to_fen()));
    }
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(game.position().en_passant(), Some(sq("d6")));
    assert!(game.legal_moves_from(sq("e5")).contains(&Move::from_uci("e5d6").unwrap()));

    play(&mut game, &["e5d6"]);
    assert_eq!(
        game.position().piece_at(sq("d6")),
        Some((Piece::Pawn, Color::White))
    );
    assert!(game.position().is_empty(sq("d5")));
    assert_eq!(game.position().count(Piece::Pawn, Color::Black), 7);
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert_eq!(
        game.make_move_uci("e5d6"),
        Err(RuleError::IllegalMove(Move::from_uci("e5d6").unwrap()))
    );
}

#[test]
fn en_passant_that_exposes_the_king_is_illegal() {
    let position = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
    assert!(!is_legal(&position, Move::from_uci("e5d6").unwrap()));
    assert!(is_legal(&position, Move::from_uci("e5e6").unwrap()));
}

#[test]
fn en_passant_target_without_a_double_push_is_rejected() {
    // Own pawns still on e2: e3 cannot be an en passant target.
    assert!(matches!(
        Game::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - e3 0 1"),
        Err(RuleError::InvalidPosition(PositionError::InvalidEnPassant(_)))
    ));
    // No pawn on d5 to capture.
    assert!(matches!(
        Position::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1"),
        Err(PositionError::InvalidEnPassant(_))
    ));
}

#[test]
fn castling_both_wings() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["e1g1", "e8c8"]);
    let position = game.position();
    assert_eq!(position.piece_at(Square::G1), Some((Piece::King, Color::White)));
    assert_eq!(position.piece_at(Square::F1), Some((Piece::Rook, Color::White)));
    assert_eq!(position.piece_at(Square::C8), Some((Piece::King, Color::Black)));
    assert_eq!(position.piece_at(Square::D8), Some((Piece::Rook, Color::Black)));
    assert_eq!(position.castling(), chess_core::CastlingRights::NONE);
}

#[test]
fn castling_through_attacked_square_is_illegal() {
    // Black rook on f2 covers f1 but not e1, d1 or c1.
    let game = Game::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();
    assert!(!game.is_legal(Move::from_uci("e1g1").unwrap()));
    assert!(game.is_legal(Move::from_uci("e1c1").unwrap()));
}

#[test]
fn castling_into_check_is_illegal() {
    let game = Game::from_fen("r3k2r/8/8/8/8/8/6r1/R3K2R w KQkq - 0 1").unwrap();
    assert!(!game.is_legal(Move::from_uci("e1g1").unwrap()));
}

#[test]
fn castling_right_lost_after_king_returns() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["e1e2", "e8e7", "e2e1", "e7e8"]);
    assert!(!game.position().castling().has(Color::White, CastleSide::Kingside));
    assert!(!game.is_legal(Move::from_uci("e1g1").unwrap()));
    assert!(!game.is_legal(Move::from_uci("e1c1").unwrap()));
}

#[test]
fn castling_right_lost_when_rook_is_captured() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    play(&mut game, &["h1h8"]);
    assert!(!game.position().castling().has(Color::Black, CastleSide::Kingside));
    assert!(game.position().castling().has(Color::Black, CastleSide::Queenside));
}

#[test]
fn promotion_choice_via_coordinates() {
    let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(game.requires_promotion(sq("a7"), sq("a8")));
    let status = game
        .make_move_coords((6, 0), (7, 0), Some(Piece::Knight))
        .unwrap();
    assert_eq!(status, GameStatus::Normal);
    assert_eq!(
        game.position().piece_at(Square::A8),
        Some((Piece::Knight, Color::White))
    );
}

#[test]
fn underpromotion_to_rook_gives_check() {
    let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(game.make_move_uci("a7a8r"), Ok(GameStatus::Check));
    game.undo().unwrap();
    assert_eq!(
        game.position().piece_at(sq("a7")),
        Some((Piece::Pawn, Color::White))
    );
    assert!(game.position().is_empty(Square::A8));
}

#[test]
fn promotion_without_choice_becomes_queen() {
    let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    play(&mut game, &["a7a8"]);
    assert_eq!(
        game.position().piece_at(Square::A8),
        Some((Piece::Queen, Color::White))
    );
}

#[test]
fn fools_mate_ends_the_game() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert_eq!(game.winner(), Some(Color::Black));
    assert!(matches!(
        game.make_move_uci("a2a3"),
        Err(RuleError::IllegalMove(_))
    ));
}

#[test]
fn queen_move_stalemates() {
    let mut game = Game::from_fen("k7/8/8/1Q6/8/8/8/K7 w - - 0 1").unwrap();
    assert_eq!(game.make_move_uci("b5b6"), Ok(GameStatus::Stalemate));
    assert!(game.is_game_over());
    assert_eq!(game.winner(), None);
    assert_eq!(classify(game.position()), GameStatus::Stalemate);
}

#[test]
fn pinned_piece_cannot_move() {
    let position = Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves_from(&position, sq("e2")).is_empty());
}

#[test]
fn opponent_pieces_have_no_moves() {
    let game = Game::new();
    assert!(game.legal_moves_from(sq("e7")).is_empty());
    assert!(game.legal_moves_from(sq("e4")).is_empty());
}

#[test]
fn errors_leave_the_session_unchanged() {
    let mut game = Game::new();
    play(&mut game, &["e2e4"]);
    let fen = game.to_fen();

    assert_eq!(
        game.make_move_uci("e4e5"),
        Err(RuleError::IllegalMove(Move::from_uci("e4e5").unwrap()))
    );
    assert_eq!(
        game.make_move_uci("a3a4"),
        Err(RuleError::NoPieceAtSource(sq("a3")))
    );
    assert!(matches!(
        game.make_move_coords((6, 4), (4, 9), None),
        Err(RuleError::InvalidSquare(_))
    ));
    assert!(matches!(game.make_move_uci("zz"), Err(RuleError::InvalidUci(_))));
    assert_eq!(game.to_fen(), fen);
    assert_eq!(game.ply_count(), 1);
}

#[test]
fn undo_walks_back_to_the_start() {
    let mut game = Game::new();
    let mut fens = vec![game.to_fen()];
    let line = [
        "e2e4", "d7d5", "e4e5", "f7f5", "e5f6", "g8f6", "g1f3", "b8c6", "f1c4", "c8e6", "e1g1",
    ];
    for uci in line {
        game.make_move_uci(uci).unwrap();
        fens.push(game.to_fen());
    }
    fens.pop();
    while let Some(expected) = fens.pop() {
        game.undo().unwrap();
        assert_eq!(game.to_fen(), expected);
    }
    assert_eq!(game.undo(), Err(RuleError::EmptyHistory));
    assert_eq!(game.position(), &Position::startpos());
}

#[test]
fn invalid_fen_is_reported() {
    assert!(matches!(
        Game::from_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
        Err(RuleError::InvalidPosition(_))
    ));
}

#[test]
fn game_resumes_from_json() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "c7c5", "g1f3", "d7d6"]);
    let json = serde_json::to_string_pretty(&game).unwrap();
    let mut resumed: Game = serde_json::from_str(&json).unwrap();
    assert_eq!(resumed.to_fen(), game.to_fen());
    play(&mut resumed, &["d2d4"]);
    assert_eq!(resumed.ply_count(), 5);
}
