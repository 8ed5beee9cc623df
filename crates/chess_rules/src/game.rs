//! A board plus the history the board alone cannot carry.
//!
//! `Game` keeps the undo tokens of every played move and the position key of
//! every position reached, which is what threefold-repetition detection and
//! multi-step take-back need.

use tracing::debug;

use crate::board::Board;
use crate::error::{ChessError, FenError};
use crate::executor::UndoToken;
use crate::movegen::legal_moves;
use crate::notation::parse_move;
use crate::status::{GameStatus, classify};
use crate::types::Move;

#[derive(Debug)]
pub struct Game {
    board: Board,
    undo_stack: Vec<UndoToken>,
    /// Key of every position reached, the starting one included.
    keys: Vec<u64>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        let keys = vec![board.position_hash()];
        Game {
            board,
            undo_stack: Vec::new(),
            keys,
        }
    }

    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        Ok(Game::new(Board::from_fen(text)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fen(&self) -> String {
        self.board.to_fen()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board)
    }

    /// Moves played since the starting position, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.undo_stack.iter().map(UndoToken::mv)
    }

    pub fn play(&mut self, mv: Move) -> Result<(), ChessError> {
        let token = self.board.apply(mv)?;
        self.undo_stack.push(token);
        self.keys.push(self.board.position_hash());
        Ok(())
    }

    /// Parse move text against the current position and play it.
    pub fn play_text(&mut self, text: &str) -> Result<Move, ChessError> {
        let mv = parse_move(&self.board, text)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Take back the last move played.
    pub fn undo(&mut self) -> Result<Move, ChessError> {
        let Some(token) = self.undo_stack.pop() else {
            debug!("undo with empty history");
            return Err(ChessError::UndoUnderflow);
        };
        let mv = token.mv();
        self.board.undo(token)?;
        self.keys.pop();
        Ok(mv)
    }

    /// Number of times the current position has occurred, counting only
    /// positions since the last capture or pawn move.
    pub fn repetitions(&self) -> usize {
        let Some(&current) = self.keys.last() else {
            return 0;
        };
        let window = (self.board.halfmove_clock() as usize).saturating_add(1);
        self.keys
            .iter()
            .rev()
            .take(window)
            .step_by(2)
            .filter(|&&k| k == current)
            .count()
    }

    /// `classify` plus threefold repetition.
    pub fn status(&self) -> GameStatus {
        let status = classify(&self.board, &self.legal_moves());
        if !status.is_terminal() && self.repetitions() >= 3 {
            GameStatus::DrawByThreefoldRepetition
        } else {
            status
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Board::startpos())
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
