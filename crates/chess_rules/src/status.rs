//! Game-state classification.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::*;

/// How a position stands for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// Side to move is in check but has a legal reply.
    Check,
    Checkmate,
    Stalemate,
    DrawByFiftyMoveRule,
    DrawByInsufficientMaterial,
    /// Only reported by [`crate::Game`], which holds the position history.
    DrawByThreefoldRepetition,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::DrawByFiftyMoveRule
                | GameStatus::DrawByInsufficientMaterial
                | GameStatus::DrawByThreefoldRepetition
        )
    }
}

/// Classify `board` given its already-generated legal moves.
///
/// Precedence: checkmate, stalemate, fifty-move rule, insufficient material,
/// check. A mate delivered on the hundredth quiet ply is still mate.
pub fn classify(board: &Board, legal: &[Move]) -> GameStatus {
    let in_check = board.is_check();
    if legal.is_empty() {
        return if in_check {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        };
    }
    if board.is_fifty_move_draw() {
        GameStatus::DrawByFiftyMoveRule
    } else if board.is_insufficient_material() {
        GameStatus::DrawByInsufficientMaterial
    } else if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}

impl Board {
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock() >= 100
    }

    /// Neither side can force mate: bare kings, a single minor piece against
    /// a bare king, or only bishops that all stand on one square colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishops = Bitboard::EMPTY;
        for (sq, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight => minors += 1,
                PieceKind::Bishop => {
                    minors += 1;
                    bishops.set(sq);
                }
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            }
        }
        if minors <= 1 {
            return true;
        }
        let all_bishops = bishops.popcount() == minors;
        let light = (bishops & Bitboard::LIGHT_SQUARES).popcount();
        all_bishops && (light == 0 || light == minors)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;
