//! Chess rules core: board state, legal move generation, move application
//! with exact undo, game-state classification and FEN.
//!
//! Everything here is synchronous and free of I/O. A `Board` is a plain
//! value with a single owner; share it across threads only behind the
//! caller's own lock or by handing it off.
//!
//! ```
//! use chess_rules::{Board, classify, legal_moves, parse_move, GameStatus};
//!
//! let mut board = Board::startpos();
//! assert_eq!(legal_moves(&board).len(), 20);
//!
//! let mv = parse_move(&board, "e2e4").unwrap();
//! let token = board.apply(mv).unwrap();
//! assert_eq!(classify(&board, &legal_moves(&board)), GameStatus::Ongoing);
//! board.undo(token).unwrap();
//! assert_eq!(board, Board::startpos());
//! ```

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod bridge;
pub mod error;
pub mod executor;
pub mod features;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod status;
pub mod types;
pub mod zobrist;

pub use attacks::{attacked_squares, is_attacked};
pub use bitboard::Bitboard;
pub use board::{Board, CastlingRights, STARTPOS_FEN};
pub use bridge::{BridgeError, MoveSearch, ReplyParseError, SearchReply, SearchRequest, request_move};
pub use error::{ChessError, FenError, FenField, FenReason};
pub use executor::UndoToken;
pub use game::Game;
pub use movegen::{legal_moves, legal_moves_into, pseudo_legal_moves, pseudo_legal_moves_into};
pub use notation::{MoveText, parse_move};
pub use perft::{divide, perft};
pub use status::{GameStatus, classify};
pub use types::*;
pub use zobrist::ZOBRIST;
