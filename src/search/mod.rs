//! Alpha-beta search.
//!
//! Color-parameterized minimax over the forced-capture move list, with
//! transposition-table bound tightening, PV/TT-driven move ordering and a
//! tactical quiescence extension at the horizon. Integer scores throughout;
//! [`INFINITY`] stands in for the unbounded window ends.

pub mod iterative;
pub mod quiescence;

use chess::ChessMove;

use crate::board::Position;
use crate::forced::forced_legal_moves;
use crate::ordering::order_moves;
use crate::tt::{Bound, TranspositionTable};

pub use iterative::{iterative_deepening, SearchResult};
pub use quiescence::quiescence;

/// Window sentinel, far beyond any reachable evaluation.
pub const INFINITY: i32 = 1_000_000;

/// Scores above this magnitude are treated as forced mates.
pub const MATE_THRESHOLD: i32 = 29_000;

/// Minimax with alpha-beta pruning.
///
/// `maximizing` is true when White is to move. `ply` is the distance from
/// the root and indexes `pv` for the ordering hint. The position is mutated
/// through make/unmake while searching and is restored before returning.
/// Returns the score and the best move; the move is `None` at leaves.
pub fn minimax(
    pos: &mut Position,
    tt: &mut TranspositionTable,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ply: u32,
    pv: &[ChessMove],
) -> (i32, Option<ChessMove>) {
    let key = pos.zobrist();
    if let Some(entry) = tt.probe(key) {
        if entry.depth >= depth {
            match entry.bound {
                Bound::Exact => return (entry.score, entry.best_move),
                Bound::UpperBound => beta = beta.min(entry.score),
                Bound::LowerBound => alpha = alpha.max(entry.score),
            }
            if alpha >= beta {
                return (entry.score, entry.best_move);
            }
        }
    }

    if depth == 0 || pos.is_game_over() {
        return (quiescence(pos, alpha, beta, maximizing, None), None);
    }

    let (orig_alpha, orig_beta) = (alpha, beta);
    let pv_hint = pv.get(ply as usize).copied();
    let moves = order_moves(pos.board(), forced_legal_moves(pos.board()), pv_hint, tt);

    let mut best_move = None;
    let mut best_score = if maximizing { -INFINITY } else { INFINITY };

    for mv in moves {
        pos.make(mv);
        let (score, _) = minimax(pos, tt, depth - 1, alpha, beta, !maximizing, ply + 1, pv);
        pos.unmake();

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    let bound = if best_score <= orig_alpha {
        Bound::UpperBound
    } else if best_score >= orig_beta {
        Bound::LowerBound
    } else {
        Bound::Exact
    };
    tt.store(key, depth, best_score, bound, best_move);

    (best_score, best_move)
}
