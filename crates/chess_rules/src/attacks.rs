//! Attack detection.
//!
//! This module contains:
//! - Knight, king and pawn attack tables (computed at compile time)
//! - Sliding piece attacks by ray-casting against the occupancy
//! - `is_attacked` / `attacked_squares`, the king-safety queries used by
//!   move generation and game-status classification
//!
//! None of these allocate.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

/// Pre-computed knight attacks for each square.
pub static KNIGHT_ATTACKS: [Bitboard; 64] = {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let bb = 1u64 << sq;
        let mut result = 0u64;

        result |= (bb << 17) & Bitboard::NOT_FILE_A.0; // up 2, right 1
        result |= (bb << 15) & Bitboard::NOT_FILE_H.0; // up 2, left 1
        result |= (bb << 10) & Bitboard::NOT_FILE_AB.0; // up 1, right 2
        result |= (bb << 6) & Bitboard::NOT_FILE_GH.0; // up 1, left 2
        result |= (bb >> 6) & Bitboard::NOT_FILE_AB.0; // down 1, right 2
        result |= (bb >> 10) & Bitboard::NOT_FILE_GH.0; // down 1, left 2
        result |= (bb >> 15) & Bitboard::NOT_FILE_A.0; // down 2, right 1
        result |= (bb >> 17) & Bitboard::NOT_FILE_H.0; // down 2, left 1

        attacks[sq as usize] = Bitboard(result);
        sq += 1;
    }
    attacks
};

/// Pre-computed king attacks for each square.
pub static KING_ATTACKS: [Bitboard; 64] = {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let bb = 1u64 << sq;
        let mut result = 0u64;

        result |= bb << 8;
        result |= bb >> 8;
        result |= (bb << 1) & Bitboard::NOT_FILE_A.0;
        result |= (bb >> 1) & Bitboard::NOT_FILE_H.0;
        result |= (bb << 9) & Bitboard::NOT_FILE_A.0;
        result |= (bb << 7) & Bitboard::NOT_FILE_H.0;
        result |= (bb >> 7) & Bitboard::NOT_FILE_A.0;
        result |= (bb >> 9) & Bitboard::NOT_FILE_H.0;

        attacks[sq as usize] = Bitboard(result);
        sq += 1;
    }
    attacks
};

/// Pre-computed pawn captures, indexed by [color][square].
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = {
    let mut attacks = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0u8;
    while sq < 64 {
        let bb = 1u64 << sq;
        // White captures north-east / north-west, Black south-east / south-west.
        attacks[0][sq as usize] =
            Bitboard(((bb << 9) & Bitboard::NOT_FILE_A.0) | ((bb << 7) & Bitboard::NOT_FILE_H.0));
        attacks[1][sq as usize] =
            Bitboard(((bb >> 7) & Bitboard::NOT_FILE_A.0) | ((bb >> 9) & Bitboard::NOT_FILE_H.0));
        sq += 1;
    }
    attacks
};

#[inline(always)]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.idx()][sq.index()]
}

#[inline(always)]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline(always)]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

// =============================================================================
// Sliding piece attacks
// =============================================================================

/// RAYS[direction][square] holds every square in that direction from sq,
/// sq itself excluded. Directions: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW
pub static RAYS: [[Bitboard; 64]; 8] = {
    const STEPS: [(i8, i8); 8] = [
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
        (-1, 0),
        (-1, 1),
    ];
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = STEPS[dir];
        let mut sq = 0u8;
        while sq < 64 {
            let mut bb = 0u64;
            let mut f = (sq % 8) as i8 + df;
            let mut r = (sq / 8) as i8 + dr;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                bb |= 1u64 << (r * 8 + f);
                f += df;
                r += dr;
            }
            rays[dir][sq as usize] = Bitboard(bb);
            sq += 1;
        }
        dir += 1;
    }
    rays
};

/// Cast rays outward from `sq`; each ray stops at (and includes) its first
/// occupied square. Positive directions run toward higher square indices, so
/// their nearest blocker is the lowest set bit; negative ones the highest.
#[inline]
fn ray_attacks(sq: Square, occupied: Bitboard, positive: [usize; 2], negative: [usize; 2]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for dir in positive {
        let ray = RAYS[dir][sq.index()];
        match (ray & occupied).lsb() {
            Some(blocker) => attacks |= ray & !RAYS[dir][blocker.index()],
            None => attacks |= ray,
        }
    }
    for dir in negative {
        let ray = RAYS[dir][sq.index()];
        match (ray & occupied).msb() {
            Some(blocker) => attacks |= ray & !RAYS[dir][blocker.index()],
            None => attacks |= ray,
        }
    }
    attacks
}

#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, [1, 7], [3, 5])
}

#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, occupied, [0, 2], [4, 6])
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

// =============================================================================
// Attack map queries
// =============================================================================

/// True if any piece of `by` attacks `target` on the current occupancy.
///
/// This is a pseudo-legal test: the attacker's own king safety is ignored,
/// and pawns count as attacking their capture squares whether or not those
/// are occupied. Lookups go from `target` outward: a pawn of `by` attacks
/// `target` exactly when a pawn of the other colour on `target` would attack
/// the pawn's square.
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    let theirs = board.occupancy(by);
    let has = |candidates: Bitboard, kinds: &[PieceKind]| {
        (candidates & theirs).any(|sq| {
            board
                .piece_at(sq)
                .is_some_and(|pc| kinds.contains(&pc.kind))
        })
    };

    has(pawn_attacks(target, by.other()), &[PieceKind::Pawn])
        || has(knight_attacks(target), &[PieceKind::Knight])
        || has(king_attacks(target), &[PieceKind::King])
        || has(
            bishop_attacks(target, board.occupied()),
            &[PieceKind::Bishop, PieceKind::Queen],
        )
        || has(
            rook_attacks(target, board.occupied()),
            &[PieceKind::Rook, PieceKind::Queen],
        )
}

/// Every square attacked by a piece of `by`.
pub fn attacked_squares(board: &Board, by: Color) -> Bitboard {
    let occupied = board.occupied();
    let mut attacked = Bitboard::EMPTY;
    for sq in board.occupancy(by) {
        let Some(pc) = board.piece_at(sq) else {
            continue;
        };
        attacked |= match pc.kind {
            PieceKind::Pawn => pawn_attacks(sq, by),
            PieceKind::Knight => knight_attacks(sq),
            PieceKind::Bishop => bishop_attacks(sq, occupied),
            PieceKind::Rook => rook_attacks(sq, occupied),
            PieceKind::Queen => queen_attacks(sq, occupied),
            PieceKind::King => king_attacks(sq),
        };
    }
    attacked
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
