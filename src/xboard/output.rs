//! xboard protocol output formatting.
//!
//! Moves cross the boundary in coordinate notation (`e2e4`, `e7e8q`),
//! which is what `ChessMove`'s `Display` produces.

use chess::ChessMove;

/// Feature lines sent in response to `protover`, terminated by `done=1`.
#[must_use]
pub fn feature_lines() -> Vec<String> {
    vec![
        "feature ping=1 setboard=1 colors=0 usermove=1".to_string(),
        "feature done=1".to_string(),
    ]
}

/// Announce the engine's move.
#[must_use]
pub fn format_move(mv: &ChessMove) -> String {
    format!("move {mv}")
}

#[must_use]
pub fn format_pong(n: u32) -> String {
    format!("pong {n}")
}

/// Response to an incoming draw offer.
#[must_use]
pub fn decline() -> String {
    "decline".to_string()
}

/// Outgoing draw offer.
#[must_use]
pub fn offer_draw() -> String {
    "draw".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::Square;

    #[test]
    fn features_end_with_done() {
        let lines = feature_lines();
        assert!(lines[0].contains("setboard=1"));
        assert!(lines[0].contains("usermove=1"));
        assert_eq!(lines.last().map(String::as_str), Some("feature done=1"));
    }

    #[test]
    fn move_uses_coordinate_notation() {
        let mv = ChessMove::new(Square::E2, Square::E4, None);
        assert_eq!(format_move(&mv), "move e2e4");
        let promo = ChessMove::new(Square::E7, Square::E8, Some(chess::Piece::Queen));
        assert_eq!(format_move(&promo), "move e7e8q");
    }

    #[test]
    fn pong_echoes_the_number() {
        assert_eq!(format_pong(7), "pong 7");
    }
}
