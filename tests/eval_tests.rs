//! Evaluation tests at the whole-function level; individual terms are
//! covered by unit tests next to their modules.

use snatch::board::Position;
use snatch::eval::{evaluate, game_phase, MATE_SCORE, MAX_PHASE};

#[test]
fn starting_position_is_near_zero() {
    let pos = Position::startpos();
    let score = evaluate(pos.board(), 0);
    assert!(
        score.abs() <= 50,
        "starting position should be near balanced, got {score}"
    );
}

#[test]
fn an_extra_pawn_shows_up_as_roughly_a_pawn() {
    // White has all eight pawns, Black is missing the h-pawn.
    let pos = Position::from_fen("rnbqkbnr/ppppppp1/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        .expect("valid fen");
    let score = evaluate(pos.board(), 0);
    assert!(score > 50, "a pawn up should score clearly positive: {score}");
}

#[test]
fn a_missing_queen_is_a_disaster() {
    let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1")
        .expect("valid fen");
    let score = evaluate(pos.board(), 0);
    assert!(score < -500, "queen down should be badly negative: {score}");
}

#[test]
fn checkmated_position_scores_a_mate() {
    // Scholar's mate: Black to move, mated.
    let pos = Position::from_fen(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
    )
    .expect("valid fen");
    let score = evaluate(pos.board(), 0);
    assert!(score.abs() >= 29_000, "mate magnitude expected, got {score}");
    assert_eq!(score, MATE_SCORE);
}

#[test]
fn mate_distance_shrinks_with_ply() {
    let pos = Position::from_fen(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
    )
    .expect("valid fen");
    assert!(evaluate(pos.board(), 2) < evaluate(pos.board(), 0));
}

#[test]
fn phase_tracks_remaining_material() {
    assert_eq!(game_phase(Position::startpos().board()), MAX_PHASE);
    let rook_endgame =
        Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("valid fen");
    assert_eq!(game_phase(rook_endgame.board()), 2);
}

#[test]
fn evaluation_is_pure() {
    let pos = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1")
        .expect("valid fen");
    let first = evaluate(pos.board(), 0);
    let second = evaluate(pos.board(), 0);
    assert_eq!(first, second);
    assert_eq!(
        pos.board().to_string(),
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1"
    );
}

#[test]
fn hanging_major_piece_drags_the_score_down() {
    // The white queen stands en prise to the b4 knight, defended by nobody.
    let with_hanging =
        Position::from_fen("4k3/8/8/8/1n6/8/8/Q3K3 b - - 0 1").expect("valid fen");
    let safe = Position::from_fen("4k3/8/8/8/1n6/8/8/3QK3 b - - 0 1").expect("valid fen");
    assert!(evaluate(with_hanging.board(), 0) < evaluate(safe.board(), 0));
}
