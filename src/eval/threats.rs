//! Threat terms: capture chains, aggression and trap patterns.
//!
//! Under forced capture, every attacked piece is a potential lever: the
//! opponent can often be compelled to start an exchange whether it helps
//! them or not. These terms price attacked material, attacking pressure and
//! fork/skewer shapes accordingly.

use chess::{BitBoard, Board, Color, File, Piece, Rank, Square, EMPTY};

use crate::board::{attacks_from, is_attacked, is_pinned, FILE_MASKS};

const CHAIN_PENALTY: i32 = 50;

const CHECK_PRESSURE: i32 = 50;
const OPEN_FILE_BONUS: i32 = 20;
const HALF_OPEN_FILE_BONUS: i32 = 10;
const KING_RING_ATTACKER_BONUS: i32 = 15;

const FORK_BONUS_PER_VICTIM: i32 = 40;
const PIN_ATTACK_BONUS: i32 = 25;
const SKEWER_BONUS: i32 = 30;
const UNDERDOG_ATTACK_BONUS: i32 = 15;
const FORK_VICTIM_THRESHOLD: i32 = 300;

/// Penalty per attacked non-king piece: full weight when undefended, a
/// third of it when a defender stands by.
#[must_use]
pub fn capture_chains(board: &Board) -> i32 {
    let mut score = 0;
    for sq in *board.combined() {
        let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) else {
            continue;
        };
        if piece == Piece::King {
            continue;
        }
        if !is_attacked(board, sq, !color) {
            continue;
        }
        let penalty = if is_attacked(board, sq, color) {
            CHAIN_PENALTY / 3
        } else {
            CHAIN_PENALTY
        };
        score += if color == Color::White {
            -penalty
        } else {
            penalty
        };
    }
    score
}

/// Value of threatening a piece, by victim type.
fn victim_base(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 10,
        Piece::Knight | Piece::Bishop => 30,
        Piece::Rook => 50,
        Piece::Queen => 90,
        Piece::King => 0,
    }
}

/// Exchange value used by the trap patterns.
fn trap_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight | Piece::Bishop => 300,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 20_000,
    }
}

/// Attacking pressure: threats on enemy pieces (heavier when the target is
/// undefended), the check tempo, heavy pieces on open and half-open files,
/// and attackers bearing on the enemy king's ring.
#[must_use]
pub fn aggression(board: &Board) -> i32 {
    let mut score = 0;
    let all_pawns = *board.pieces(Piece::Pawn);

    for sq in *board.combined() {
        let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) else {
            continue;
        };
        let sign = if color == Color::White { 1 } else { -1 };
        let attacks = attacks_from(board, sq);
        let targets = attacks & *board.color_combined(!color);

        for target in targets {
            let Some(victim) = board.piece_on(target) else {
                continue;
            };
            if victim == Piece::King {
                continue;
            }
            let mut bonus = victim_base(victim);
            if !is_attacked(board, target, !color) {
                bonus = bonus * 3 / 2;
            }
            score += sign * bonus;
        }

        if piece == Piece::Rook || piece == Piece::Queen {
            let file = sq.get_file().to_index();
            let pawns_on_file = (all_pawns & FILE_MASKS[file]).popcnt();
            score += sign
                * match pawns_on_file {
                    0 => OPEN_FILE_BONUS,
                    1 => HALF_OPEN_FILE_BONUS,
                    _ => 0,
                };
        }

        let enemy_king_ring = chess::get_king_moves(board.king_square(!color));
        if attacks & enemy_king_ring != EMPTY {
            score += sign * KING_RING_ATTACKER_BONUS;
        }
    }

    // The checking side gets the tempo credit.
    if *board.checkers() != EMPTY {
        score += if board.side_to_move() == Color::White {
            -CHECK_PRESSURE
        } else {
            CHECK_PRESSURE
        };
    }

    score
}

/// Trap patterns: forks on substantial material, attacks on pinned pieces,
/// slider skewers through to the enemy queen or king, and cheap pieces
/// harassing expensive ones.
#[must_use]
pub fn traps(board: &Board) -> i32 {
    let mut score = 0;
    for sq in *board.combined() {
        let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) else {
            continue;
        };
        let sign = if color == Color::White { 1 } else { -1 };
        let targets = attacks_from(board, sq) & *board.color_combined(!color);

        let mut fork_victims = 0;
        for target in targets {
            let Some(victim) = board.piece_on(target) else {
                continue;
            };
            if trap_value(victim) >= FORK_VICTIM_THRESHOLD {
                fork_victims += 1;
            }
            if is_pinned(board, target) {
                score += sign * PIN_ATTACK_BONUS;
            }
            if victim != Piece::King && trap_value(victim) > trap_value(piece) {
                score += sign * UNDERDOG_ATTACK_BONUS;
            }
            if victim != Piece::King
                && matches!(piece, Piece::Bishop | Piece::Rook | Piece::Queen)
                && skewers_royal(board, sq, target, color)
            {
                score += sign * SKEWER_BONUS;
            }
        }

        if fork_victims >= 2
            && matches!(
                piece,
                Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen
            )
        {
            score += sign * FORK_BONUS_PER_VICTIM * fork_victims;
        }
    }
    score
}

/// Whether the first piece behind `target` on the `attacker -> target` ray
/// is an enemy queen or king.
fn skewers_royal(board: &Board, attacker: Square, target: Square, color: Color) -> bool {
    let Some(behind) = first_piece_behind(board, attacker, target) else {
        return false;
    };
    board.color_on(behind) == Some(!color)
        && matches!(board.piece_on(behind), Some(Piece::Queen | Piece::King))
}

/// First occupied square strictly beyond `through`, continuing the ray from
/// `from`. `None` when the two squares do not share a ray or the board edge
/// is reached first.
fn first_piece_behind(board: &Board, from: Square, through: Square) -> Option<Square> {
    let file_step = (through.get_file().to_index() as i32 - from.get_file().to_index() as i32)
        .signum();
    let rank_step = (through.get_rank().to_index() as i32 - from.get_rank().to_index() as i32)
        .signum();
    if file_step == 0 && rank_step == 0 {
        return None;
    }

    let mut file = through.get_file().to_index() as i32 + file_step;
    let mut rank = through.get_rank().to_index() as i32 + rank_step;
    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let sq = Square::make_square(Rank::from_index(rank as usize), File::from_index(file as usize));
        if *board.combined() & BitBoard::from_square(sq) != EMPTY {
            return Some(sq);
        }
        file += file_step;
        rank += rank_step;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn undefended_attacked_piece_costs_full_chain_penalty() {
        // Black queen e7 attacks the undefended white pawn e4.
        let board = Board::from_str("4k3/4q3/8/8/4P3/8/8/K7 w - - 0 1").expect("valid fen");
        assert_eq!(capture_chains(&board), -CHAIN_PENALTY);
    }

    #[test]
    fn defended_piece_costs_a_third() {
        let board = Board::from_str("4k3/4q3/8/8/4P3/4R3/8/K7 w - - 0 1").expect("valid fen");
        // Pawn e4 is defended by the rook behind it; the rook itself is not
        // attacked (the queen's file attack stops at the pawn).
        assert_eq!(capture_chains(&board), -(CHAIN_PENALTY / 3));
    }

    #[test]
    fn check_pressure_signed_against_side_in_check() {
        // White to move, in check from the e7 rook: Black owns the tempo.
        let with_check =
            Board::from_str("4k3/4r3/8/8/8/8/8/4K3 w - - 0 1").expect("valid fen");
        let quiet = Board::from_str("4k3/r7/8/8/8/8/8/6K1 w - - 0 1").expect("valid fen");
        assert!(aggression(&with_check) < aggression(&quiet));
    }

    #[test]
    fn rooks_prefer_open_files() {
        let open = Board::from_str("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("valid fen");
        let closed = Board::from_str("4k3/8/8/8/8/8/P7/R3K3 w - - 0 1").expect("valid fen");
        assert!(aggression(&open) > aggression(&closed));
    }

    #[test]
    fn knight_fork_on_two_majors_scores() {
        // Knight on d5 forks the c7 rook and e7 rook.
        let board = Board::from_str("k7/2r1r3/8/3N4/8/8/8/4K3 w - - 0 1").expect("valid fen");
        assert!(traps(&board) >= 2 * FORK_BONUS_PER_VICTIM);
    }

    #[test]
    fn skewer_through_to_the_king_scores() {
        // Rook a8 attacks the d8 rook with the black king behind it on f8.
        let board = Board::from_str("R2r1k2/8/8/8/8/8/8/4K3 b - - 0 1").expect("valid fen");
        assert!(traps(&board) >= SKEWER_BONUS);
    }

    #[test]
    fn pawn_attacking_queen_is_an_underdog_threat() {
        let board = Board::from_str("4k3/8/8/3q4/4P3/8/8/4K3 b - - 0 1").expect("valid fen");
        // White pawn e4 attacks the d5 queen.
        assert!(traps(&board) >= UNDERDOG_ATTACK_BONUS);
    }
}
