//! Static evaluation.
//!
//! Scores are centipawns from White's perspective. Material and
//! piece-square terms are blended between middlegame and endgame weights by
//! a phase in `0..=24`; the remaining terms encode the tactics of the
//! forced-capture variant, where a piece that *can* capture *must*, and a
//! hanging piece is a liability of a different order than in normal chess.

pub mod king_safety;
pub mod mobility;
pub mod pawns;
pub mod tables;
pub mod threats;

use chess::{Board, BoardStatus, Color, Piece, Rank};

use crate::board::{insufficient_material, mirror};

pub use king_safety::king_safety;
pub use mobility::mobility;
pub use pawns::{pawn_structure, passed_pawns};
pub use threats::{aggression, capture_chains, traps};

/// Absolute score of a checkmate at the root.
pub const MATE_SCORE: i32 = 30_000;

/// Phase value of a pure middlegame; 0 is a pure endgame.
pub const MAX_PHASE: i32 = 24;

/// Bonus for a pawn one step from promotion.
const SEVENTH_RANK_PAWN_BONUS: i32 = 800;

const BISHOP_PAIR_BONUS: i32 = 30;

/// Evaluate `board` from White's perspective.
///
/// `ply` is the distance from the search root; mates closer to the root
/// score higher in magnitude so the search prefers the shortest mate.
#[must_use]
pub fn evaluate(board: &Board, ply: i32) -> i32 {
    match board.status() {
        BoardStatus::Checkmate => {
            return if board.side_to_move() == Color::White {
                -MATE_SCORE + ply
            } else {
                MATE_SCORE - ply
            };
        }
        BoardStatus::Stalemate => return 0,
        BoardStatus::Ongoing => {}
    }
    if insufficient_material(board) {
        return 0;
    }

    let phase = game_phase(board);
    material_and_pst(board, phase)
        + king_safety(board, phase)
        + mobility(board)
        + capture_chains(board)
        + pawn_structure(board)
        + passed_pawns(board)
        + aggression(board)
        + traps(board)
}

/// Game phase from remaining non-pawn material, clamped to [`MAX_PHASE`].
#[must_use]
pub fn game_phase(board: &Board) -> i32 {
    let weight = |piece: Piece, w: i32| board.pieces(piece).popcnt() as i32 * w;
    let phase = weight(Piece::Knight, 1)
        + weight(Piece::Bishop, 1)
        + weight(Piece::Rook, 2)
        + weight(Piece::Queen, 4);
    phase.min(MAX_PHASE)
}

/// Material and piece-square contribution, phase-blended.
///
/// White reads tables by square index, Black by the vertical mirror. The
/// king carries no material value; its two tables are interpolated instead.
#[must_use]
pub fn material_and_pst(board: &Board, phase: i32) -> i32 {
    let mut score = 0;
    for sq in *board.combined() {
        let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) else {
            continue;
        };
        let idx = if color == Color::White {
            sq.to_index()
        } else {
            mirror(sq).to_index()
        };

        let term = if piece == Piece::King {
            (tables::KING_MIDDLE_PST[idx] * phase
                + tables::KING_ENDGAME_PST[idx] * (MAX_PHASE - phase))
                / MAX_PHASE
        } else {
            let material = (tables::base_value(piece) * phase
                + tables::endgame_value(piece) * (MAX_PHASE - phase))
                / MAX_PHASE;
            let mut value = material + tables::middle_pst(piece)[idx];
            if piece == Piece::Pawn && on_seventh_rank(sq.get_rank(), color) {
                value += SEVENTH_RANK_PAWN_BONUS;
            }
            value
        };

        score += if color == Color::White { term } else { -term };
    }

    for color in [Color::White, Color::Black] {
        let bishops = (*board.pieces(Piece::Bishop) & *board.color_combined(color)).popcnt();
        if bishops >= 2 {
            score += if color == Color::White {
                BISHOP_PAIR_BONUS
            } else {
                -BISHOP_PAIR_BONUS
            };
        }
    }

    score
}

fn on_seventh_rank(rank: Rank, color: Color) -> bool {
    match color {
        Color::White => rank == Rank::Seventh,
        Color::Black => rank == Rank::Second,
    }
}
