//! xboard protocol command parsing.

/// Commands the engine understands. Anything else parses to `Unknown` and
/// is ignored by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XBoardCommand {
    /// Enter xboard mode.
    XBoard,
    /// Protocol version negotiation.
    Protover(u32),
    /// Start a new game.
    New,
    /// Passive mode: apply moves, never reply.
    Force,
    /// Leave force mode and think for the side to move.
    Go,
    /// Set the engine's color.
    White,
    Black,
    /// Load a position from FEN.
    SetBoard(String),
    /// Opponent's move in coordinate notation.
    UserMove(String),
    /// Keepalive.
    Ping(u32),
    /// Opponent offers a draw.
    Draw,
    /// Session time control: `level <moves> <minutes> <inc>`.
    Level {
        moves_per_session: u32,
        base_minutes: u32,
        increment_seconds: u32,
    },
    /// Sudden-death seconds per move.
    St(u32),
    /// Our remaining clock, centiseconds.
    Time(u64),
    /// Opponent's remaining clock, centiseconds.
    OTime(u64),
    Quit,
    Unknown(String),
}

/// Parse one protocol line. Empty lines yield `None`.
#[must_use]
pub fn parse_xboard_command(line: &str) -> Option<XBoardCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    let cmd = match parts[0] {
        "xboard" => XBoardCommand::XBoard,
        "new" => XBoardCommand::New,
        "force" => XBoardCommand::Force,
        "go" => XBoardCommand::Go,
        "white" => XBoardCommand::White,
        "black" => XBoardCommand::Black,
        "draw" => XBoardCommand::Draw,
        "offer" if parts.get(1) == Some(&"draw") => XBoardCommand::Draw,
        "quit" => XBoardCommand::Quit,
        "protover" => match parts.get(1).and_then(|v| v.parse().ok()) {
            Some(version) => XBoardCommand::Protover(version),
            None => XBoardCommand::Unknown(trimmed.to_string()),
        },
        "ping" => match parts.get(1).and_then(|v| v.parse().ok()) {
            Some(n) => XBoardCommand::Ping(n),
            None => XBoardCommand::Unknown(trimmed.to_string()),
        },
        "setboard" => XBoardCommand::SetBoard(parts[1..].join(" ")),
        "usermove" => match parts.get(1) {
            Some(mv) => XBoardCommand::UserMove((*mv).to_string()),
            None => XBoardCommand::Unknown(trimmed.to_string()),
        },
        "level" => match parse_level(&parts) {
            Some(cmd) => cmd,
            None => XBoardCommand::Unknown(trimmed.to_string()),
        },
        "st" => match parts.get(1).and_then(|v| v.parse().ok()) {
            Some(seconds) => XBoardCommand::St(seconds),
            None => XBoardCommand::Unknown(trimmed.to_string()),
        },
        "time" => match parts.get(1).and_then(|v| v.parse().ok()) {
            Some(cs) => XBoardCommand::Time(cs),
            None => XBoardCommand::Unknown(trimmed.to_string()),
        },
        "otim" => match parts.get(1).and_then(|v| v.parse().ok()) {
            Some(cs) => XBoardCommand::OTime(cs),
            None => XBoardCommand::Unknown(trimmed.to_string()),
        },
        _ => XBoardCommand::Unknown(trimmed.to_string()),
    };
    Some(cmd)
}

fn parse_level(parts: &[&str]) -> Option<XBoardCommand> {
    let moves_per_session = parts.get(1)?.parse().ok()?;
    let base_minutes = parts.get(2)?.parse().ok()?;
    let increment_seconds = parts.get(3)?.parse().ok()?;
    Some(XBoardCommand::Level {
        moves_per_session,
        base_minutes,
        increment_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse_xboard_command("xboard"), Some(XBoardCommand::XBoard));
        assert_eq!(parse_xboard_command("new"), Some(XBoardCommand::New));
        assert_eq!(parse_xboard_command("force"), Some(XBoardCommand::Force));
        assert_eq!(parse_xboard_command("go"), Some(XBoardCommand::Go));
        assert_eq!(parse_xboard_command("quit"), Some(XBoardCommand::Quit));
    }

    #[test]
    fn parses_protover_and_ping() {
        assert_eq!(
            parse_xboard_command("protover 2"),
            Some(XBoardCommand::Protover(2))
        );
        assert_eq!(parse_xboard_command("ping 42"), Some(XBoardCommand::Ping(42)));
    }

    #[test]
    fn parses_usermove() {
        assert_eq!(
            parse_xboard_command("usermove e2e4"),
            Some(XBoardCommand::UserMove("e2e4".to_string()))
        );
    }

    #[test]
    fn parses_setboard_with_full_fen() {
        let cmd = parse_xboard_command(
            "setboard rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        );
        match cmd {
            Some(XBoardCommand::SetBoard(fen)) => assert!(fen.starts_with("rnbqkbnr")),
            other => panic!("expected SetBoard, got {other:?}"),
        }
    }

    #[test]
    fn parses_time_controls() {
        assert_eq!(
            parse_xboard_command("level 40 5 0"),
            Some(XBoardCommand::Level {
                moves_per_session: 40,
                base_minutes: 5,
                increment_seconds: 0,
            })
        );
        assert_eq!(parse_xboard_command("st 10"), Some(XBoardCommand::St(10)));
        assert_eq!(parse_xboard_command("time 6000"), Some(XBoardCommand::Time(6000)));
        assert_eq!(parse_xboard_command("otim 5400"), Some(XBoardCommand::OTime(5400)));
    }

    #[test]
    fn offer_draw_is_a_draw_offer() {
        assert_eq!(parse_xboard_command("offer draw"), Some(XBoardCommand::Draw));
    }

    #[test]
    fn empty_line_is_none_and_garbage_is_unknown() {
        assert_eq!(parse_xboard_command("   "), None);
        assert_eq!(
            parse_xboard_command("frobnicate"),
            Some(XBoardCommand::Unknown("frobnicate".to_string()))
        );
    }
}
