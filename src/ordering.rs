//! Move ordering.
//!
//! Moves are ranked PV hint first, then the table's best move, then
//! captures by MVV/LVA with check and promotion sweeteners. Quiet moves
//! keep their generator order at the bottom (the sort is stable).

use std::cmp::Reverse;

use chess::{Board, ChessMove, Piece};

use crate::board::{gives_check, is_capture};
use crate::tt::TranspositionTable;

const PV_HINT_SCORE: i32 = 2_000_000;
const TT_MOVE_SCORE: i32 = 1_500_000;
const CAPTURE_BASE: i32 = 50_000;
const CHECK_BONUS: i32 = 20_000;
const PROMOTION_BASE: i32 = 40_000;

/// Piece values used only for ordering decisions.
fn ordering_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 20_000,
    }
}

/// Sort `moves` best-first. `pv_move` is the principal-variation hint for
/// this ply; the TT best move for the position ranks just below it.
#[must_use]
pub fn order_moves(
    board: &Board,
    mut moves: Vec<ChessMove>,
    pv_move: Option<ChessMove>,
    tt: &TranspositionTable,
) -> Vec<ChessMove> {
    let tt_move = tt.probe(board.get_hash()).and_then(|entry| entry.best_move);
    moves.sort_by_key(|mv| Reverse(score_move(board, *mv, pv_move, tt_move)));
    moves
}

fn score_move(
    board: &Board,
    mv: ChessMove,
    pv_move: Option<ChessMove>,
    tt_move: Option<ChessMove>,
) -> i32 {
    if pv_move == Some(mv) {
        return PV_HINT_SCORE;
    }
    if tt_move == Some(mv) {
        return TT_MOVE_SCORE;
    }
    if !is_capture(board, mv) {
        return 0;
    }

    // En passant leaves the destination square empty; the victim is a pawn.
    let victim = board
        .piece_on(mv.get_dest())
        .map_or(ordering_value(Piece::Pawn), ordering_value);
    let attacker = board.piece_on(mv.get_source()).map_or(0, ordering_value);
    let mut score = CAPTURE_BASE + 10 * victim - attacker;

    if gives_check(board, mv) {
        score += CHECK_BONUS;
    }
    if let Some(promo) = mv.get_promotion() {
        score += PROMOTION_BASE + ordering_value(promo);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forced::forced_legal_moves;
    use crate::tt::Bound;
    use chess::Square;
    use std::str::FromStr;

    fn rook_forks_two() -> Board {
        // White rook d4 can take the d7 pawn or the g4 knight.
        Board::from_str("4k3/3p4/8/8/3R2n1/8/8/4K3 w - - 0 1").expect("valid fen")
    }

    #[test]
    fn highest_victim_capture_ranks_first() {
        let board = rook_forks_two();
        let tt = TranspositionTable::new(16);
        let ordered = order_moves(&board, forced_legal_moves(&board), None, &tt);
        assert_eq!(ordered[0], ChessMove::new(Square::D4, Square::G4, None));
    }

    #[test]
    fn pv_hint_overrides_mvv_lva() {
        let board = rook_forks_two();
        let tt = TranspositionTable::new(16);
        let pawn_grab = ChessMove::new(Square::D4, Square::D7, None);
        let ordered = order_moves(&board, forced_legal_moves(&board), Some(pawn_grab), &tt);
        assert_eq!(ordered[0], pawn_grab);
    }

    #[test]
    fn tt_move_overrides_mvv_lva() {
        let board = rook_forks_two();
        let mut tt = TranspositionTable::new(16);
        let pawn_grab = ChessMove::new(Square::D4, Square::D7, None);
        tt.store(board.get_hash(), 3, 0, Bound::Exact, Some(pawn_grab));
        let ordered = order_moves(&board, forced_legal_moves(&board), None, &tt);
        assert_eq!(ordered[0], pawn_grab);
    }

    #[test]
    fn quiet_moves_keep_generator_order() {
        let board = Board::default();
        let tt = TranspositionTable::new(16);
        let moves = forced_legal_moves(&board);
        let ordered = order_moves(&board, moves.clone(), None, &tt);
        // No captures, hints or checks at the start: the sort must be a
        // no-op.
        assert_eq!(ordered, moves);
    }
}
