//! The forced-capture rule.
//!
//! In this variant the side to move must capture whenever at least one
//! capture is legal. Every move enumeration in the engine goes through
//! [`forced_legal_moves`] so the rule holds at every node of the search.

use chess::{Board, ChessMove, MoveGen};

use crate::board::is_capture;

/// Legal moves under the forced-capture rule: the captures from the legal
/// move list if any exist, otherwise the full list. Order within each class
/// is the generator's order.
#[must_use]
pub fn forced_legal_moves(board: &Board) -> Vec<ChessMove> {
    let all: Vec<ChessMove> = MoveGen::new_legal(board).collect();
    let captures: Vec<ChessMove> = all
        .iter()
        .copied()
        .filter(|mv| is_capture(board, *mv))
        .collect();
    if captures.is_empty() {
        all
    } else {
        captures
    }
}
