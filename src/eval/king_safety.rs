//! King ring safety.

use chess::{Board, Color};

use crate::board::{attackers_to, is_pinned};
use crate::eval::MAX_PHASE;

const RING_PRESSURE_PENALTY: i32 = 20;

/// Penalty for defended material in the king's ring that the opponent can
/// actually take: a ring square counts when it holds one of the king's own
/// pieces and at least one unpinned enemy piece attacks it. Scaled down as
/// the game empties out, since an exposed king matters less with fewer
/// attackers on the board.
#[must_use]
pub fn king_safety(board: &Board, phase: i32) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let ring = chess::get_king_moves(board.king_square(color));
        let mut exposed = 0;
        for sq in ring {
            if board.color_on(sq) != Some(color) {
                continue;
            }
            let mut attackers = attackers_to(board, sq, !color);
            if attackers.any(|a| !is_pinned(board, a)) {
                exposed += 1;
            }
        }
        let penalty = RING_PRESSURE_PENALTY * exposed * phase / MAX_PHASE;
        score += if color == Color::White {
            -penalty
        } else {
            penalty
        };
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn quiet_king_has_no_penalty() {
        let board = Board::default();
        assert_eq!(king_safety(&board, MAX_PHASE), 0);
    }

    #[test]
    fn attacked_shield_pawn_is_penalized() {
        // Black rook on f8 bears down on the f2 pawn next to the white king.
        let board =
            Board::from_str("5rk1/8/8/8/8/8/5P2/4K3 b - - 0 1").expect("valid fen");
        assert!(king_safety(&board, MAX_PHASE) < 0);
    }

    #[test]
    fn pinned_attacker_does_not_count() {
        // The f4 bishop attacks the d2 knight in the white king's ring, but
        // it is pinned to its own king by the rook on f1.
        let board =
            Board::from_str("5k2/8/8/8/5b2/8/3N4/4KR2 w - - 0 1").expect("valid fen");
        assert_eq!(king_safety(&board, MAX_PHASE), 0);
    }
}
