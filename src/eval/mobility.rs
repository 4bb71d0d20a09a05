//! Mobility under the forced-capture rule.

use chess::{Board, Color, Piece};

use crate::board::is_capture;
use crate::forced::forced_legal_moves;

/// Mobility for the side to move, negated when Black is on move.
///
/// Freedom of choice is what counts in this variant. With no capture on the
/// board the side to move keeps its full move list; a single forced capture
/// removes all choice; several forced captures usually mean a losing
/// exchange chain is underway. Being compelled to capture with the queen is
/// worse still, since the queen is the easiest piece to trap afterwards.
#[must_use]
pub fn mobility(board: &Board) -> i32 {
    let forced = forced_legal_moves(board);
    let captures: Vec<_> = forced
        .iter()
        .copied()
        .filter(|mv| is_capture(board, *mv))
        .collect();

    let mut value = match captures.len() {
        0 => 5 + forced.len() as i32,
        1 => -10,
        n => -20 * n as i32,
    };

    if !captures.is_empty()
        && captures
            .iter()
            .all(|mv| board.piece_on(mv.get_source()) == Some(Piece::Queen))
    {
        value -= 30;
    }

    if board.side_to_move() == Color::White {
        value
    } else {
        -value
    }
}
