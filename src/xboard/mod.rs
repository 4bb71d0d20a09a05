//! xboard (WinBoard) protocol driver.
//!
//! Line-oriented loop over stdin/stdout. Protocol replies are the only
//! stdout traffic and every batch is flushed; diagnostics go to the log on
//! stderr. The search runs synchronously on this thread between reads.

pub mod command;
pub mod output;

use std::io::{self, BufRead, Write};

use chess::{ChessMove, Color, File, MoveGen, Piece, Rank, Square};
use log::{debug, warn};

use crate::board::Position;
use crate::engine::time::GameClock;
use crate::forced::forced_legal_moves;
use crate::search::iterative_deepening;
use crate::tt::{TranspositionTable, DEFAULT_TT_CAPACITY};

use command::{parse_xboard_command, XBoardCommand};
use output::{decline, feature_lines, format_move, format_pong, offer_draw};

/// Nominal depth ceiling; the clock is the real limiter.
pub const MAX_SEARCH_DEPTH: u32 = 50;

/// Engine-relative score at or below which we offer a draw.
const DRAW_OFFER_THRESHOLD: i32 = -2_000;

/// Protocol handler and game state.
pub struct XBoardHandler {
    position: Position,
    tt: TranspositionTable,
    clock: GameClock,
    force_mode: bool,
    engine_color: Color,
    max_depth: u32,
    quit: bool,
}

impl XBoardHandler {
    #[must_use]
    pub fn new() -> Self {
        XBoardHandler {
            position: Position::startpos(),
            tt: TranspositionTable::new(DEFAULT_TT_CAPACITY),
            clock: GameClock::new(),
            force_mode: false,
            engine_color: Color::Black,
            max_depth: MAX_SEARCH_DEPTH,
            quit: false,
        }
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle one raw input line and return the replies to print.
    pub fn handle_line(&mut self, line: &str) -> Vec<String> {
        debug!("recv: {}", line.trim_end());
        match parse_xboard_command(line) {
            Some(cmd) => self.handle_command(&cmd),
            None => Vec::new(),
        }
    }

    /// Handle a parsed command.
    pub fn handle_command(&mut self, cmd: &XBoardCommand) -> Vec<String> {
        match cmd {
            XBoardCommand::XBoard => Vec::new(),
            XBoardCommand::Protover(_) => feature_lines(),
            XBoardCommand::New => {
                self.position = Position::startpos();
                self.force_mode = false;
                self.engine_color = Color::Black;
                self.tt.clear();
                self.clock.reset();
                Vec::new()
            }
            XBoardCommand::Force => {
                self.force_mode = true;
                Vec::new()
            }
            XBoardCommand::Go => {
                self.force_mode = false;
                self.engine_color = self.position.side_to_move();
                self.engine_move()
            }
            XBoardCommand::White => {
                self.engine_color = Color::White;
                Vec::new()
            }
            XBoardCommand::Black => {
                self.engine_color = Color::Black;
                Vec::new()
            }
            XBoardCommand::SetBoard(fen) => {
                match Position::from_fen(fen) {
                    Ok(position) => self.position = position,
                    Err(err) => warn!("rejected setboard '{fen}': {err}"),
                }
                Vec::new()
            }
            XBoardCommand::UserMove(mv) => self.handle_user_move(mv),
            XBoardCommand::Ping(n) => vec![format_pong(*n)],
            XBoardCommand::Draw => vec![decline()],
            XBoardCommand::Level {
                moves_per_session,
                base_minutes,
                increment_seconds,
            } => {
                self.clock
                    .set_level(*moves_per_session, *base_minutes, *increment_seconds);
                Vec::new()
            }
            XBoardCommand::St(seconds) => {
                self.clock.set_sudden_death(*seconds);
                Vec::new()
            }
            XBoardCommand::Time(cs) => {
                self.clock.set_remaining(*cs);
                Vec::new()
            }
            XBoardCommand::OTime(cs) => {
                self.clock.set_opponent(*cs);
                Vec::new()
            }
            XBoardCommand::Quit => {
                self.quit = true;
                Vec::new()
            }
            XBoardCommand::Unknown(line) => {
                debug!("ignoring unknown command: {line}");
                Vec::new()
            }
        }
    }

    /// Apply the user's move if it is legal; illegal or unparsable moves
    /// are dropped silently. Reply with our own move when engaged.
    fn handle_user_move(&mut self, mv_str: &str) -> Vec<String> {
        let Some(mv) = parse_uci_move(self.position.board(), mv_str) else {
            debug!("ignoring illegal or unparsable move: {mv_str}");
            return Vec::new();
        };
        self.position.make(mv);

        if !self.force_mode
            && self.position.side_to_move() == self.engine_color
            && !self.position.is_game_over()
        {
            self.engine_move()
        } else {
            Vec::new()
        }
    }

    /// Pick and play a move for the engine side.
    fn engine_move(&mut self) -> Vec<String> {
        if self.position.is_game_over() {
            return Vec::new();
        }

        // With a single forced reply there is nothing to think about.
        let forced = forced_legal_moves(self.position.board());
        if forced.len() == 1 {
            let mv = forced[0];
            self.position.make(mv);
            return vec![format_move(&mv)];
        }

        let budget = self.clock.per_move_budget();
        let panic = self.clock.in_panic();
        let result = iterative_deepening(
            &mut self.position,
            &mut self.tt,
            self.max_depth,
            Some(budget),
            panic,
        );
        self.clock.consume(result.elapsed);

        let mut replies = Vec::new();
        let engine_score = if self.engine_color == Color::White {
            result.score
        } else {
            -result.score
        };
        if !self.force_mode
            && engine_score <= DRAW_OFFER_THRESHOLD
            && result.elapsed >= budget / 5
        {
            replies.push(offer_draw());
        }

        if let Some(mv) = result.best_move {
            self.position.make(mv);
            replies.push(format_move(&mv));
        }
        replies
    }

    /// Blocking stdin/stdout loop. Returns after `quit`.
    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for reply in self.handle_line(&line) {
                writeln!(stdout, "{reply}").ok();
            }
            stdout.flush().ok();
            if self.quit {
                break;
            }
        }
    }
}

impl Default for XBoardHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for the binary.
pub fn run() {
    XBoardHandler::new().run();
}

/// Parse a coordinate-notation move and validate it against the legal
/// moves of `board`.
#[must_use]
pub fn parse_uci_move(board: &chess::Board, s: &str) -> Option<ChessMove> {
    let bytes = s.trim().as_bytes();
    if bytes.len() < 4 {
        return None;
    }
    let from = parse_square(bytes[0], bytes[1])?;
    let to = parse_square(bytes[2], bytes[3])?;
    let promotion = match bytes.get(4) {
        None => None,
        Some(b'q') => Some(Piece::Queen),
        Some(b'r') => Some(Piece::Rook),
        Some(b'b') => Some(Piece::Bishop),
        Some(b'n') => Some(Piece::Knight),
        Some(_) => return None,
    };
    let mv = ChessMove::new(from, to, promotion);
    MoveGen::new_legal(board).any(|legal| legal == mv).then_some(mv)
}

fn parse_square(file: u8, rank: u8) -> Option<Square> {
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(Square::make_square(
        Rank::from_index((rank - b'1') as usize),
        File::from_index((file - b'a') as usize),
    ))
}
