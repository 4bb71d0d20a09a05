//! Board adapter over the `chess` crate.
//!
//! Move generation, legality, attack lookups and Zobrist hashing all come
//! from the board library; this module wraps them behind the small surface
//! the search and evaluator need. The library's `Board` is copy-make, so
//! [`Position`] layers a history stack on top to provide strict make/unmake
//! pairing with exact state restoration.

use chess::{
    BitBoard, Board, BoardStatus, ChessMove, Color, File, MoveGen, Piece, Rank, Square,
    ALL_SQUARES, EMPTY,
};
use once_cell::sync::Lazy;

/// Bitboard mask for each file, index 0 = a-file.
pub static FILE_MASKS: Lazy<[BitBoard; 8]> = Lazy::new(|| {
    let mut masks = [EMPTY; 8];
    for (f, mask) in masks.iter_mut().enumerate() {
        for r in 0..8 {
            *mask |= BitBoard::set(Rank::from_index(r), File::from_index(f));
        }
    }
    masks
});

/// Mask of the files adjacent to each file.
pub static ADJACENT_FILE_MASKS: Lazy<[BitBoard; 8]> = Lazy::new(|| {
    let mut masks = [EMPTY; 8];
    for f in 0..8 {
        if f > 0 {
            masks[f] |= FILE_MASKS[f - 1];
        }
        if f < 7 {
            masks[f] |= FILE_MASKS[f + 1];
        }
    }
    masks
});

/// A game position with make/unmake support.
///
/// The search mutates the position on the way down the tree and restores it
/// on the way back up. Every `make` must be matched by exactly one `unmake`;
/// a mismatch is a fatal internal error.
#[derive(Clone, Debug)]
pub struct Position {
    current: Board,
    history: Vec<Board>,
}

impl Position {
    /// Standard starting position.
    #[must_use]
    pub fn startpos() -> Self {
        Position {
            current: Board::default(),
            history: Vec::new(),
        }
    }

    /// Parse a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, chess::Error> {
        Ok(Position {
            current: fen.parse()?,
            history: Vec::new(),
        })
    }

    /// The underlying board for read-only queries.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.current
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.current.side_to_move()
    }

    /// 64-bit Zobrist key of the current position.
    #[must_use]
    pub fn zobrist(&self) -> u64 {
        self.current.get_hash()
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.current.king_square(color)
    }

    #[must_use]
    pub fn in_check(&self) -> bool {
        *self.current.checkers() != EMPTY
    }

    /// All legal moves under standard chess rules.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(&self.current).collect()
    }

    /// Apply a move. Pushes the previous board onto the history stack.
    pub fn make(&mut self, mv: ChessMove) {
        let next = self.current.make_move_new(mv);
        self.history.push(std::mem::replace(&mut self.current, next));
    }

    /// Undo the most recent `make`.
    pub fn unmake(&mut self) {
        self.current = self
            .history
            .pop()
            .expect("unmake called without a matching make");
    }

    /// Whether making `mv` leaves the opponent in check. Covers discovered
    /// checks: the post-move checker set includes every attacker of the
    /// opponent king, not just the moved piece.
    #[must_use]
    pub fn gives_check(&self, mv: ChessMove) -> bool {
        gives_check(&self.current, mv)
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.current.status() == BoardStatus::Checkmate
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.current.status() == BoardStatus::Stalemate
    }

    #[must_use]
    pub fn insufficient_material(&self) -> bool {
        insufficient_material(&self.current)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.current.status() != BoardStatus::Ongoing || insufficient_material(&self.current)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Whether `mv` captures an enemy piece.
///
/// Castling never lands on an occupied square and legal moves never land on
/// a friendly piece, so an occupied destination is always a capture. The
/// remaining case is en passant: a pawn changing file onto an empty square.
#[must_use]
pub fn is_capture(board: &Board, mv: ChessMove) -> bool {
    if board.piece_on(mv.get_dest()).is_some() {
        return true;
    }
    board.piece_on(mv.get_source()) == Some(Piece::Pawn)
        && mv.get_source().get_file() != mv.get_dest().get_file()
}

/// Whether making `mv` gives check to the opponent.
#[must_use]
pub fn gives_check(board: &Board, mv: ChessMove) -> bool {
    *board.make_move_new(mv).checkers() != EMPTY
}

/// All pieces of `by` attacking `sq`.
#[must_use]
pub fn attackers_to(board: &Board, sq: Square, by: Color) -> BitBoard {
    let occupied = *board.combined();
    let us = *board.color_combined(by);
    let rooks = (*board.pieces(Piece::Rook) | *board.pieces(Piece::Queen)) & us;
    let bishops = (*board.pieces(Piece::Bishop) | *board.pieces(Piece::Queen)) & us;

    let mut attackers = chess::get_knight_moves(sq) & *board.pieces(Piece::Knight) & us;
    attackers |= chess::get_king_moves(sq) & *board.pieces(Piece::King) & us;
    attackers |= chess::get_pawn_attacks(sq, !by, *board.pieces(Piece::Pawn) & us);
    attackers |= chess::get_rook_moves(sq, occupied) & rooks;
    attackers |= chess::get_bishop_moves(sq, occupied) & bishops;
    attackers
}

/// Whether any piece of `by` attacks `sq`.
#[must_use]
pub fn is_attacked(board: &Board, sq: Square, by: Color) -> bool {
    attackers_to(board, sq, by) != EMPTY
}

/// Squares attacked by the piece on `sq`, or empty if the square is vacant.
#[must_use]
pub fn attacks_from(board: &Board, sq: Square) -> BitBoard {
    let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) else {
        return EMPTY;
    };
    let occupied = *board.combined();
    match piece {
        Piece::Pawn => chess::get_pawn_attacks(sq, color, !EMPTY),
        Piece::Knight => chess::get_knight_moves(sq),
        Piece::Bishop => chess::get_bishop_moves(sq, occupied),
        Piece::Rook => chess::get_rook_moves(sq, occupied),
        Piece::Queen => chess::get_bishop_moves(sq, occupied) | chess::get_rook_moves(sq, occupied),
        Piece::King => chess::get_king_moves(sq),
    }
}

/// Whether the piece on `sq` is absolutely pinned to its own king.
///
/// Detected by removing the piece from the occupancy and checking for enemy
/// sliders that newly attack the king through the vacated square.
#[must_use]
pub fn is_pinned(board: &Board, sq: Square) -> bool {
    let Some(color) = board.color_on(sq) else {
        return false;
    };
    if board.piece_on(sq) == Some(Piece::King) {
        return false;
    }
    let king_sq = board.king_square(color);
    let occupied = *board.combined();
    let without = occupied ^ BitBoard::from_square(sq);
    let enemy = *board.color_combined(!color);
    let rooks = (*board.pieces(Piece::Rook) | *board.pieces(Piece::Queen)) & enemy;
    let bishops = (*board.pieces(Piece::Bishop) | *board.pieces(Piece::Queen)) & enemy;

    let before = (chess::get_rook_moves(king_sq, occupied) & rooks)
        | (chess::get_bishop_moves(king_sq, occupied) & bishops);
    let after = (chess::get_rook_moves(king_sq, without) & rooks)
        | (chess::get_bishop_moves(king_sq, without) & bishops);
    after & !before != EMPTY
}

/// Insufficient mating material: bare kings, or king plus at most one minor
/// piece per side.
#[must_use]
pub fn insufficient_material(board: &Board) -> bool {
    let pawns = board.pieces(Piece::Pawn).popcnt();
    let rooks = board.pieces(Piece::Rook).popcnt();
    let queens = board.pieces(Piece::Queen).popcnt();
    if pawns + rooks + queens > 0 {
        return false;
    }
    let minors = |color: Color| {
        ((*board.pieces(Piece::Knight) | *board.pieces(Piece::Bishop))
            & *board.color_combined(color))
        .popcnt()
    };
    minors(Color::White) <= 1 && minors(Color::Black) <= 1
}

/// Vertical reflection of a square (a1 <-> a8).
#[must_use]
pub fn mirror(sq: Square) -> Square {
    ALL_SQUARES[sq.to_index() ^ 56]
}
