//! Pawn structure and passed pawns.

use chess::{Board, Color, Piece, Square, EMPTY};

use crate::board::{ADJACENT_FILE_MASKS, FILE_MASKS};

const DOUBLED_PENALTY: i32 = 10;
const ISOLATED_PENALTY: i32 = 12;
const CONNECTED_BONUS: i32 = 6;
const PASSED_BONUS_PER_RANK: i32 = 10;

/// Doubled, isolated and connected pawn terms, both colors netted and then
/// halved: structure matters less here than in normal chess because chains
/// are routinely ripped apart by forced exchanges.
#[must_use]
pub fn pawn_structure(board: &Board) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let pawns = *board.pieces(Piece::Pawn) & *board.color_combined(color);
        let sign = if color == Color::White { 1 } else { -1 };

        for file in 0..8 {
            let count = (pawns & FILE_MASKS[file]).popcnt() as i32;
            if count > 1 {
                score -= sign * DOUBLED_PENALTY * (count - 1);
            }
        }

        for sq in pawns {
            let file = sq.get_file().to_index();
            if pawns & ADJACENT_FILE_MASKS[file] == EMPTY {
                score -= sign * ISOLATED_PENALTY;
            } else {
                score += sign * CONNECTED_BONUS;
            }
        }
    }
    score / 2
}

/// Bonus for pawns with no enemy pawn anywhere on their own file, growing
/// with the distance already covered from the starting rank.
#[must_use]
pub fn passed_pawns(board: &Board) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let pawns = *board.pieces(Piece::Pawn) & *board.color_combined(color);
        let enemy_pawns = *board.pieces(Piece::Pawn) & *board.color_combined(!color);
        let sign = if color == Color::White { 1 } else { -1 };

        for sq in pawns {
            let file = sq.get_file().to_index();
            if enemy_pawns & FILE_MASKS[file] != EMPTY {
                continue;
            }
            score += sign * PASSED_BONUS_PER_RANK * advance(sq, color);
        }
    }
    score
}

fn advance(sq: Square, color: Color) -> i32 {
    let rank = sq.get_rank().to_index() as i32;
    match color {
        Color::White => rank - 1,
        Color::Black => 6 - rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn doubled_isolated_pawns_are_penalized() {
        // Two white pawns stacked on the a-file with no neighbors: one
        // doubling penalty plus two isolation penalties, then halved.
        let board = Board::from_str("4k3/8/8/8/8/P7/P7/4K3 w - - 0 1").expect("valid fen");
        assert_eq!(pawn_structure(&board), (-10 - 12 * 2) / 2);
    }

    #[test]
    fn lone_pawn_is_isolated() {
        let board = Board::from_str("4k3/8/8/8/8/8/P7/4K3 w - - 0 1").expect("valid fen");
        assert_eq!(pawn_structure(&board), -12 / 2);
    }

    #[test]
    fn connected_pawns_earn_their_bonus() {
        let board = Board::from_str("4k3/8/8/8/8/8/PP6/4K3 w - - 0 1").expect("valid fen");
        assert_eq!(pawn_structure(&board), (6 * 2) / 2);
    }

    #[test]
    fn passed_pawn_bonus_grows_with_advance() {
        let near = Board::from_str("4k3/8/8/8/8/P7/8/4K3 w - - 0 1").expect("valid fen");
        let far = Board::from_str("4k3/8/P7/8/8/8/8/4K3 w - - 0 1").expect("valid fen");
        assert_eq!(passed_pawns(&near), 10);
        assert_eq!(passed_pawns(&far), 40);
    }

    #[test]
    fn blocked_file_is_not_passed() {
        let board = Board::from_str("4k3/p7/8/8/8/P7/8/4K3 w - - 0 1").expect("valid fen");
        assert_eq!(passed_pawns(&board), 0);
    }
}
