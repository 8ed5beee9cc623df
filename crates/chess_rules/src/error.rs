//! Error kinds surfaced by the rules core.
//!
//! Every error here is a local, recoverable condition. Operations that fail
//! leave the board exactly as it was.

use std::fmt;

use crate::types::Color;

/// Crate-wide error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error(transparent)]
    Fen(#[from] FenError),

    /// The move is not in the legal set of the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Move text that is not `<from><to>[promotion]`.
    #[error("invalid move text: {0:?}")]
    InvalidMoveText(String),

    #[error("invalid square name: {0:?}")]
    InvalidSquare(String),

    /// Undo requested with nothing left to take back.
    #[error("no move to undo")]
    UndoUnderflow,

    /// Undo token handed to a board that is not in the state it was made for.
    #[error("undo token for {0} does not match the current position")]
    UndoMismatch(String),
}

/// Which of the six FEN fields failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenField {
    FieldCount,
    Placement,
    SideToMove,
    Castling,
    EnPassant,
    HalfmoveClock,
    FullmoveNumber,
}

impl fmt::Display for FenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FenField::FieldCount => "field count",
            FenField::Placement => "piece placement",
            FenField::SideToMove => "side to move",
            FenField::Castling => "castling rights",
            FenField::EnPassant => "en-passant square",
            FenField::HalfmoveClock => "halfmove clock",
            FenField::FullmoveNumber => "fullmove number",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenReason {
    #[error("missing field")]
    MissingField,
    #[error("unexpected trailing field {0:?}")]
    TrailingField(String),
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),
    #[error("invalid piece letter {0:?}")]
    InvalidPieceLetter(char),
    #[error("rank {rank} covers {files} files instead of 8")]
    RankFileCount { rank: u8, files: u32 },
    #[error("expected one {color:?} king, found {count}")]
    KingCount { color: Color, count: u32 },
    #[error("invalid colour letter {0:?}")]
    InvalidColor(String),
    #[error("invalid castling letter {0:?}")]
    InvalidCastlingLetter(char),
    #[error("duplicate castling letter {0:?}")]
    DuplicateCastlingLetter(char),
    #[error("invalid square name {0:?}")]
    InvalidSquare(String),
    #[error("en-passant square {0} is not on the rank behind a double push")]
    EnPassantRank(String),
    #[error("not a non-negative integer: {0:?}")]
    NotAnInteger(String),
    #[error("fullmove number must be at least 1")]
    NotPositive,
}

/// A malformed FEN string, naming the field at fault.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid FEN {field}: {reason}")]
pub struct FenError {
    pub field: FenField,
    pub reason: FenReason,
}

impl FenError {
    pub fn new(field: FenField, reason: FenReason) -> Self {
        Self { field, reason }
    }
}
