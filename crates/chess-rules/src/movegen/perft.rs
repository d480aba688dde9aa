//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against published values to validate the move generator.

use super::generate_moves;
use crate::executor::make_move;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&m| perft(&make_move(position, m).0, depth - 1))
        .sum()
}

/// Node count below each root move, sorted by UCI text.
///
/// Comparing this against a reference engine narrows a wrong total down to
/// the move whose subtree disagrees.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = generate_moves(position)
        .iter()
        .map(|&m| {
            let (next, _) = make_move(position, m);
            (m.to_uci(), perft(&next, depth.saturating_sub(1)))
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const PROMOTIONS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const TALKCHESS: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1";

    fn check(fen: &str, expected: &[u64]) {
        let position = Position::from_fen(fen).unwrap();
        for (depth, &nodes) in (1..).zip(expected) {
            assert_eq!(perft(&position, depth), nodes, "{fen} at depth {depth}");
        }
    }

    #[test]
    fn perft_startpos() {
        check(chess_core::Fen::STARTPOS, &[20, 400, 8902]);
    }

    #[test]
    fn perft_startpos_depth_4() {
        let position = Position::startpos();
        assert_eq!(perft(&position, 4), 197_281);
    }

    // Castling through attacked squares, en passant, promotions.
    #[test]
    fn perft_kiwipete() {
        check(KIWIPETE, &[48, 2039]);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_3() {
        let position = Position::from_fen(KIWIPETE).unwrap();
        assert_eq!(perft(&position, 3), 97_862);
    }

    // Check evasion and en passant that would expose the king along the rank.
    #[test]
    fn perft_rook_endgame() {
        check(ENDGAME, &[14, 191, 2812]);
    }

    #[test]
    fn perft_promotions() {
        check(PROMOTIONS, &[6, 264, 9467]);
    }

    #[test]
    fn perft_promotion_with_capture() {
        check(TALKCHESS, &[44, 1486]);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let position = Position::startpos();
        let results = perft_divide(&position, 2);
        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, n)| *n == 20));
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&position, 2));
    }
}
