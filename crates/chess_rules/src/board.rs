use std::fmt;
use std::str::FromStr;

use crate::attacks::is_attacked;
use crate::bitboard::Bitboard;
use crate::error::FenError;
use crate::fen;
use crate::types::*;

/// The four castling permissions. Once a flag is cleared it stays cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Drop every right that depends on a piece standing on `sq`.
    pub(crate) fn revoke_for_square(&mut self, sq: Square) {
        match sq {
            Square::E1 => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Square::H1 => self.white_kingside = false,
            Square::A1 => self.white_queenside = false,
            Square::E8 => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
            Square::H8 => self.black_kingside = false,
            Square::A8 => self.black_queenside = false,
            _ => {}
        }
    }
}

/// A complete chess position.
///
/// Boards are plain values: clone freely, compare field-for-field. The only
/// mutation paths are [`Board::apply`] and [`Board::undo`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    // Derived from `squares`; kept in step by `put`/`remove`.
    by_color: [Bitboard; 2],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>, // square behind a pawn that just advanced 2
    halfmove_clock: u32,
    fullmove_number: u32,
}

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// An empty board with White to move and no rights. Only reachable from
    /// inside the crate; callers start from [`Board::startpos`] or a FEN.
    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            by_color: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();
        b.castling = CastlingRights::ALL;

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as i8;
            for (color, back_rank, pawn_rank) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let Some(sq) = Square::from_file_rank(f, back_rank) {
                    b.put(sq, Piece::new(color, kind));
                }
                if let Some(sq) = Square::from_file_rank(f, pawn_rank) {
                    b.put(sq, Piece::new(color, PieceKind::Pawn));
                }
            }
        }
        b
    }

    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        fen::decode(text)
    }

    pub fn to_fen(&self) -> String {
        fen::encode(self)
    }

    // -------------------------------------------------------------------------
    // Read-only queries
    // -------------------------------------------------------------------------

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Squares holding a piece of `color`.
    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.by_color[color.idx()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_color[0] | self.by_color[1]
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied()
            .filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    /// Number of `piece`s on the board.
    pub fn count(&self, piece: Piece) -> u32 {
        self.occupancy(piece.color)
            .filter(|&sq| self.piece_at(sq) == Some(piece))
            .count() as u32
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        let king = Piece::new(c, PieceKind::King);
        self.occupancy(c).find(|&sq| self.piece_at(sq) == Some(king))
    }

    /// True if `c`'s king is attacked. A board without that king is never in check.
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(ksq) => is_attacked(self, ksq, c.other()),
            None => false,
        }
    }

    /// True if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.in_check(self.side_to_move)
    }

    // -------------------------------------------------------------------------
    // Crate-internal mutation (FEN decoding and the move executor)
    // -------------------------------------------------------------------------

    #[inline]
    pub(crate) fn put(&mut self, sq: Square, pc: Piece) {
        if let Some(old) = self.squares[sq.index()] {
            self.by_color[old.color.idx()].clear(sq);
        }
        self.squares[sq.index()] = Some(pc);
        self.by_color[pc.color.idx()].set(sq);
    }

    #[inline]
    pub(crate) fn remove(&mut self, sq: Square) -> Option<Piece> {
        let old = self.squares[sq.index()].take();
        if let Some(pc) = old {
            self.by_color[pc.color.idx()].clear(sq);
        }
        old
    }

    pub(crate) fn set_side_to_move(&mut self, c: Color) {
        self.side_to_move = c;
    }
    pub(crate) fn castling_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling
    }
    pub(crate) fn set_castling(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }
    pub(crate) fn set_halfmove_clock(&mut self, n: u32) {
        self.halfmove_clock = n;
    }
    pub(crate) fn set_fullmove_number(&mut self, n: u32) {
        self.fullmove_number = n;
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::startpos()
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fen::decode(s)
    }
}

/// ASCII diagram, rank 8 at the top, with the FEN underneath.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in (0..8i8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8i8 {
                let ch = Square::from_file_rank(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f, "{}", rank + 1)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
