//! Zobrist keys for position identity.
//!
//! Two boards with the same placement, side to move, castling rights and
//! capturable en-passant square share a key; the clocks do not take part.
//! `Game` uses these keys for threefold-repetition detection.

use crate::attacks::pawn_attacks;
use crate::board::Board;
use crate::movegen::legal_moves;
use crate::types::{Color, MoveFlag, Piece, PieceKind, Square};

/// Random values XOR-ed together to form a position key.
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XOR-ed in when Black is to move
    pub side_to_move: u64,
    /// [white kingside, white queenside, black kingside, black queenside]
    pub castling: [u64; 4],
    /// En-passant file (0-7)
    pub en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Fill the tables from a fixed-seed xorshift64 stream so keys are
    /// identical across runs and builds.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][kind][sq] = state;
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: usize) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Board {
    /// Key identifying the position for repetition purposes.
    pub fn position_hash(&self) -> u64 {
        let mut hash = 0u64;
        for (sq, pc) in self.pieces() {
            hash ^= ZOBRIST.piece_key(pc, sq.index());
        }
        if self.side_to_move() == Color::Black {
            hash ^= ZOBRIST.side_to_move;
        }
        let rights = self.castling_rights();
        for (i, on) in [
            rights.white_kingside,
            rights.white_queenside,
            rights.black_kingside,
            rights.black_queenside,
        ]
        .into_iter()
        .enumerate()
        {
            if on {
                hash ^= ZOBRIST.castling[i];
            }
        }
        // An en-passant square only distinguishes positions when a pawn can
        // actually capture onto it.
        if let Some(ep) = self.en_passant()
            && self.en_passant_capturable(ep)
        {
            hash ^= ZOBRIST.en_passant[ep.file() as usize];
        }
        hash
    }

    /// Some pawn of the side to move can take en passant on `ep` without
    /// exposing its own king.
    fn en_passant_capturable(&self, ep: Square) -> bool {
        let us = self.side_to_move();
        let pawn = Piece::new(us, PieceKind::Pawn);
        let beside = (pawn_attacks(ep, us.other()) & self.occupancy(us))
            .any(|sq| self.piece_at(sq) == Some(pawn));
        beside
            && legal_moves(self)
                .iter()
                .any(|mv| mv.flag == MoveFlag::EnPassantCapture)
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
