//! Iterative deepening driver.
//!
//! Runs the alpha-beta core at increasing depths inside an aspiration
//! window around the previous score, re-searching with the full window on
//! failure. The wall clock is sampled between depths only; a depth in
//! flight always runs to completion, which the time manager's conservative
//! budgets account for.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use chess::{ChessMove, Color, MoveGen};
use log::debug;

use super::{minimax, INFINITY, MATE_THRESHOLD};
use crate::board::Position;
use crate::tt::TranspositionTable;

/// Half-width of the aspiration window around the previous depth's score.
pub const ASPIRATION_WINDOW: i32 = 25;

/// Depth ceiling while the clock is in panic.
const PANIC_DEPTH: u32 = 4;

/// Outcome of an iterative-deepening run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    /// Centipawns from White's perspective.
    pub score: i32,
    /// Deepest completed iteration.
    pub depth: u32,
    pub elapsed: Duration,
    /// Principal variation, legal from the root by construction.
    pub pv: Vec<ChessMove>,
}

/// Search `pos` with deepening up to `max_depth`, stopping when the budget
/// runs out or a forced mate is confirmed.
pub fn iterative_deepening(
    pos: &mut Position,
    tt: &mut TranspositionTable,
    max_depth: u32,
    time_limit: Option<Duration>,
    panic: bool,
) -> SearchResult {
    let start = Instant::now();
    let deadline = time_limit.map(|limit| start + limit);
    let expired = || deadline.is_some_and(|d| Instant::now() >= d);

    let max_depth = if panic {
        max_depth.min(PANIC_DEPTH)
    } else {
        max_depth
    };

    let mut best_move = None;
    let mut best_score = -INFINITY;
    let mut pv: Vec<ChessMove> = Vec::new();
    let mut depth_reached = 0;

    for depth in 1..=max_depth {
        if expired() {
            break;
        }

        let maximizing = pos.side_to_move() == Color::White;
        let (alpha, beta) = if depth == 1 || best_move.is_none() {
            (-INFINITY, INFINITY)
        } else {
            (
                best_score - ASPIRATION_WINDOW,
                best_score + ASPIRATION_WINDOW,
            )
        };

        let (mut score, mut mv) = minimax(pos, tt, depth, alpha, beta, maximizing, 0, &pv);
        if (score <= alpha || score >= beta) && !expired() {
            let full = minimax(pos, tt, depth, -INFINITY, INFINITY, maximizing, 0, &pv);
            score = full.0;
            mv = full.1;
        }

        best_move = mv;
        best_score = score;
        depth_reached = depth;
        pv = rebuild_pv(pos, tt, best_move, depth);

        debug!(
            "depth {depth} score {score} time {:.2}s pv {}",
            start.elapsed().as_secs_f64(),
            pv.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        );

        if score.abs() > MATE_THRESHOLD {
            debug!("mate confirmed at depth {depth}");
            break;
        }
        if expired() {
            break;
        }
    }

    SearchResult {
        best_move,
        score: best_score,
        depth: depth_reached,
        elapsed: start.elapsed(),
        pv,
    }
}

/// Rebuild the principal variation by walking TT best moves from the root.
///
/// Every candidate is checked for legality in the position reached so far,
/// and a set of visited Zobrist keys guards against cycles through shared
/// slots or repetitions. Length is capped at `max(1, depth)`.
fn rebuild_pv(
    pos: &Position,
    tt: &TranspositionTable,
    first: Option<ChessMove>,
    depth: u32,
) -> Vec<ChessMove> {
    let max_len = depth.max(1) as usize;
    let mut line = Vec::new();
    let mut board = pos.board().clone();
    let mut visited = HashSet::new();
    let mut next = first;

    while let Some(mv) = next {
        if line.len() >= max_len {
            break;
        }
        if !MoveGen::new_legal(&board).any(|legal| legal == mv) {
            break;
        }
        line.push(mv);
        board = board.make_move_new(mv);
        if !visited.insert(board.get_hash()) {
            break;
        }
        next = tt.probe(board.get_hash()).and_then(|entry| entry.best_move);
    }
    line
}
