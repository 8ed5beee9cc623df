//! Applying moves to a board and taking them back.
//!
//! `apply` only accepts moves from the current legal set; the unchecked
//! `make_move`/`unmake_move` pair underneath is what move generation and
//! perft use on positions they produced themselves.

use tracing::{debug, trace};

use crate::board::{Board, CastlingRights};
use crate::error::ChessError;
use crate::movegen::{castle_path, legal_moves};
use crate::types::*;

/// Everything `apply` changed, enough to restore the prior board exactly.
///
/// Tokens are not `Clone`: each one is consumed by the single `undo` that
/// matches the `apply` that produced it.
#[derive(Debug, PartialEq, Eq)]
pub struct UndoToken {
    mv: Move,
    moved: Piece,
    captured: Option<(Square, Piece)>,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl UndoToken {
    /// The move this token takes back.
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// The piece the move removed from the board, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.captured.map(|(_, pc)| pc)
    }
}

impl Board {
    /// Play `mv` if it is legal in this position.
    ///
    /// Illegal moves are rejected with [`ChessError::IllegalMove`] and leave
    /// the board untouched.
    pub fn apply(&mut self, mv: Move) -> Result<UndoToken, ChessError> {
        if !legal_moves(self).contains(&mv) {
            debug!(mv = %mv, fen = %self.to_fen(), "rejected illegal move");
            return Err(ChessError::IllegalMove(mv.to_string()));
        }
        trace!(mv = %mv, "apply");
        Ok(self.make_move(mv))
    }

    /// Take back the move recorded in `token`.
    ///
    /// The token must come from the most recent `apply` on this board;
    /// a token that does not fit the current position is refused with
    /// [`ChessError::UndoMismatch`] and the board is left untouched.
    pub fn undo(&mut self, token: UndoToken) -> Result<(), ChessError> {
        if !self.fits(&token) {
            debug!(mv = %token.mv, fen = %self.to_fen(), "undo token does not match position");
            return Err(ChessError::UndoMismatch(token.mv.to_string()));
        }
        trace!(mv = %token.mv, "undo");
        self.unmake_move(token);
        Ok(())
    }

    /// Whether the board looks exactly like the result of `token`'s move.
    fn fits(&self, token: &UndoToken) -> bool {
        let mv = token.mv;
        let landed = match mv.promotion {
            Some(kind) => Piece::new(token.moved.color, kind),
            None => token.moved,
        };
        let rook_in_place = match mv.flag {
            MoveFlag::CastleKingside | MoveFlag::CastleQueenside => {
                let path = castle_path(token.moved.color, mv.flag == MoveFlag::CastleKingside);
                self.piece_at(path.rook_to) == Some(Piece::new(token.moved.color, PieceKind::Rook))
                    && self.piece_at(path.rook_from).is_none()
            }
            _ => true,
        };
        let ep_victim_gone = match token.captured {
            Some((sq, _)) if sq != mv.to => self.piece_at(sq).is_none(),
            _ => true,
        };
        self.side_to_move() == token.moved.color.other()
            && self.piece_at(mv.to) == Some(landed)
            && self.piece_at(mv.from).is_none()
            && rook_in_place
            && ep_victim_gone
    }

    /// Play `mv` without checking legality. `mv` must be at least
    /// pseudo-legal for this board.
    pub(crate) fn make_move(&mut self, mv: Move) -> UndoToken {
        let us = self.side_to_move();
        debug_assert!(self.piece_at(mv.from).is_some(), "no piece on {}", mv.from);
        let moved = self
            .piece_at(mv.from)
            .unwrap_or(Piece::new(us, PieceKind::Pawn));

        let mut token = UndoToken {
            mv,
            moved,
            captured: None,
            castling: self.castling_rights(),
            en_passant: self.en_passant(),
            halfmove_clock: self.halfmove_clock(),
            fullmove_number: self.fullmove_number(),
        };

        // Capture: the victim of an en-passant capture sits behind the target.
        let capture_sq = match mv.flag {
            MoveFlag::EnPassantCapture => mv.to.offset(0, -us.forward()),
            _ => Some(mv.to),
        };
        if let Some(cs) = capture_sq
            && let Some(victim) = self.remove(cs)
        {
            token.captured = Some((cs, victim));
        }

        self.remove(mv.from);
        let landed = match mv.promotion {
            Some(kind) => Piece::new(us, kind),
            None => moved,
        };
        self.put(mv.to, landed);

        if mv.is_castle() {
            let path = castle_path(us, mv.flag == MoveFlag::CastleKingside);
            if let Some(rook) = self.remove(path.rook_from) {
                self.put(path.rook_to, rook);
            }
        }

        {
            let rights = self.castling_mut();
            rights.revoke_for_square(mv.from);
            rights.revoke_for_square(mv.to);
        }

        self.set_en_passant(match mv.flag {
            MoveFlag::DoublePawnPush => mv.from.offset(0, us.forward()),
            _ => None,
        });

        if moved.kind == PieceKind::Pawn || token.captured.is_some() {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(token.halfmove_clock.saturating_add(1));
        }

        if us == Color::Black {
            self.set_fullmove_number(token.fullmove_number.saturating_add(1));
        }
        self.set_side_to_move(us.other());

        token
    }

    pub(crate) fn unmake_move(&mut self, token: UndoToken) {
        let mv = token.mv;

        self.set_side_to_move(token.moved.color);
        self.set_castling(token.castling);
        self.set_en_passant(token.en_passant);
        self.set_halfmove_clock(token.halfmove_clock);
        self.set_fullmove_number(token.fullmove_number);

        if mv.is_castle() {
            let path = castle_path(token.moved.color, mv.flag == MoveFlag::CastleKingside);
            if let Some(rook) = self.remove(path.rook_to) {
                self.put(path.rook_from, rook);
            }
        }

        // Promotions go back as the pawn that made them.
        self.remove(mv.to);
        self.put(mv.from, token.moved);

        if let Some((sq, victim)) = token.captured {
            self.put(sq, victim);
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
