//! Boundary to an external move-search device.
//!
//! The device receives a FEN and a thinking-time budget and answers with
//! move text and an optional evaluation. How bytes reach it (serial link,
//! subprocess, ...) is the implementor's business; this module only builds
//! requests, reads replies and checks the returned move against the rules.

use std::time::Duration;

use tracing::{debug, info};

use crate::board::Board;
use crate::error::ChessError;
use crate::game::Game;
use crate::types::Move;

/// One question for the search device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub fen: String,
    pub think_time: Duration,
}

impl SearchRequest {
    pub fn new(board: &Board, think_time: Duration) -> Self {
        SearchRequest {
            fen: board.to_fen(),
            think_time,
        }
    }

    /// Command line asking the device for its best move.
    pub fn command_line(&self) -> String {
        format!("bestmove {}", self.fen)
    }

    /// Command line asking the device to evaluate the position only.
    pub fn eval_command_line(&self) -> String {
        format!("eval {}", self.fen)
    }
}

/// The device's answer, not yet validated against the position.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReply {
    pub move_text: String,
    pub evaluation: Option<f32>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyParseError {
    #[error("device output has no best move")]
    MissingMove,
    #[error("device score {0:?} is not a number")]
    InvalidScore(String),
}

impl SearchReply {
    /// Read the device's line-oriented output:
    ///
    /// ```text
    /// Best move: e2e4
    /// Score: 0.35
    /// ```
    ///
    /// Other lines (progress chatter) are ignored. The score line is optional.
    pub fn parse_device_output(text: &str) -> Result<Self, ReplyParseError> {
        let mut move_text = None;
        let mut evaluation = None;
        for line in text.lines() {
            if let Some((_, rest)) = line.split_once("Best move:") {
                move_text = rest.split_whitespace().next().map(str::to_string);
            } else if let Some((_, rest)) = line.split_once("Score:") {
                let raw = rest.trim();
                let score = raw
                    .parse::<f32>()
                    .map_err(|_| ReplyParseError::InvalidScore(raw.to_string()))?;
                evaluation = Some(score);
            }
        }
        let move_text = move_text.ok_or(ReplyParseError::MissingMove)?;
        Ok(SearchReply {
            move_text,
            evaluation,
        })
    }
}

/// Anything that can answer a [`SearchRequest`].
pub trait MoveSearch {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send the request and return the device's raw output text.
    fn search(&mut self, request: &SearchRequest) -> Result<String, Self::Error>;
}

#[derive(thiserror::Error, Debug)]
pub enum BridgeError<E: std::error::Error + 'static> {
    #[error("search device failed: {0}")]
    Search(#[source] E),
    #[error(transparent)]
    Reply(#[from] ReplyParseError),
    /// The device proposed a move the rules reject.
    #[error(transparent)]
    Rules(#[from] ChessError),
}

/// Ask `search` for a move in the game's current position and play it.
///
/// The game is left unchanged on any error.
pub fn request_move<S: MoveSearch>(
    game: &mut Game,
    search: &mut S,
    think_time: Duration,
) -> Result<(Move, Option<f32>), BridgeError<S::Error>> {
    let request = SearchRequest::new(game.board(), think_time);
    debug!(command = %request.command_line(), "sending search request");

    let output = search.search(&request).map_err(BridgeError::Search)?;
    let reply = SearchReply::parse_device_output(&output)?;
    let mv = game.play_text(&reply.move_text)?;
    info!(mv = %mv, evaluation = ?reply.evaluation, "played device move");
    Ok((mv, reply.evaluation))
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod bridge_tests;
