//! Forsyth-Edwards Notation.
//!
//! `decode` accepts exactly six whitespace-separated fields and reports the
//! first malformed one; `encode` is its exact inverse.

use tracing::debug;

use crate::board::{Board, CastlingRights};
use crate::error::{FenError, FenField, FenReason};
use crate::types::*;

pub fn decode(text: &str) -> Result<Board, FenError> {
    decode_fields(text).inspect_err(|err| debug!(fen = text, %err, "rejected FEN"))
}

fn decode_fields(text: &str) -> Result<Board, FenError> {
    let mut parts = text.split_whitespace();
    let mut next = |field: FenField| {
        parts
            .next()
            .ok_or(FenError::new(field, FenReason::MissingField))
    };

    let placement = next(FenField::Placement)?;
    let side = next(FenField::SideToMove)?;
    let castling = next(FenField::Castling)?;
    let en_passant = next(FenField::EnPassant)?;
    let halfmove = next(FenField::HalfmoveClock)?;
    let fullmove = next(FenField::FullmoveNumber)?;
    if let Some(extra) = parts.next() {
        return Err(FenError::new(
            FenField::FieldCount,
            FenReason::TrailingField(extra.to_string()),
        ));
    }

    let mut board = Board::empty();
    parse_placement(placement, &mut board)?;

    let side_to_move = match side {
        "w" => Color::White,
        "b" => Color::Black,
        _ => {
            return Err(FenError::new(
                FenField::SideToMove,
                FenReason::InvalidColor(side.to_string()),
            ));
        }
    };
    board.set_side_to_move(side_to_move);
    board.set_castling(parse_castling(castling)?);
    board.set_en_passant(parse_en_passant(en_passant, side_to_move)?);

    board.set_halfmove_clock(parse_count(halfmove, FenField::HalfmoveClock)?);
    let fullmove_number = parse_count(fullmove, FenField::FullmoveNumber)?;
    if fullmove_number == 0 {
        return Err(FenError::new(
            FenField::FullmoveNumber,
            FenReason::NotPositive,
        ));
    }
    board.set_fullmove_number(fullmove_number);

    Ok(board)
}

fn parse_placement(text: &str, board: &mut Board) -> Result<(), FenError> {
    let err = |reason| FenError::new(FenField::Placement, reason);

    let ranks: Vec<&str> = text.split('/').collect();
    if ranks.len() != 8 {
        return Err(err(FenReason::WrongRankCount(ranks.len())));
    }

    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
        let mut file: u32 = 0;
        for ch in rank_str.chars() {
            if let Some(d) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += d;
            } else {
                let pc = Piece::from_symbol(ch).ok_or(err(FenReason::InvalidPieceLetter(ch)))?;
                if let Some(sq) = Square::from_file_rank(file as i8, rank as i8) {
                    board.put(sq, pc);
                }
                file += 1;
            }
            if file > 8 {
                break;
            }
        }
        if file != 8 {
            return Err(err(FenReason::RankFileCount {
                rank: rank + 1,
                files: file,
            }));
        }
    }

    for color in Color::ALL {
        let count = board.count(Piece::new(color, PieceKind::King));
        if count != 1 {
            return Err(err(FenReason::KingCount { color, count }));
        }
    }
    Ok(())
}

fn parse_castling(text: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if text == "-" {
        return Ok(rights);
    }
    for ch in text.chars() {
        let flag = match ch {
            'K' => &mut rights.white_kingside,
            'Q' => &mut rights.white_queenside,
            'k' => &mut rights.black_kingside,
            'q' => &mut rights.black_queenside,
            _ => {
                return Err(FenError::new(
                    FenField::Castling,
                    FenReason::InvalidCastlingLetter(ch),
                ));
            }
        };
        if *flag {
            return Err(FenError::new(
                FenField::Castling,
                FenReason::DuplicateCastlingLetter(ch),
            ));
        }
        *flag = true;
    }
    Ok(rights)
}

fn parse_en_passant(text: &str, side_to_move: Color) -> Result<Option<Square>, FenError> {
    if text == "-" {
        return Ok(None);
    }
    let sq: Square = text.parse().map_err(|_| {
        FenError::new(
            FenField::EnPassant,
            FenReason::InvalidSquare(text.to_string()),
        )
    })?;
    // The target lies behind a pawn of the side that just moved.
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if sq.rank() != expected_rank {
        return Err(FenError::new(
            FenField::EnPassant,
            FenReason::EnPassantRank(text.to_string()),
        ));
    }
    Ok(Some(sq))
}

fn parse_count(text: &str, field: FenField) -> Result<u32, FenError> {
    text.parse()
        .map_err(|_| FenError::new(field, FenReason::NotAnInteger(text.to_string())))
}

pub fn encode(board: &Board) -> String {
    let mut out = String::with_capacity(90);

    for rank in (0..8i8).rev() {
        let mut empty = 0;
        for file in 0..8i8 {
            match Square::from_file_rank(file, rank).and_then(|sq| board.piece_at(sq)) {
                Some(pc) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(pc.symbol());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match board.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    });

    out.push(' ');
    let rights = board.castling_rights();
    let letters: String = [
        (rights.white_kingside, 'K'),
        (rights.white_queenside, 'Q'),
        (rights.black_kingside, 'k'),
        (rights.black_queenside, 'q'),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|&(_, ch)| ch)
    .collect();
    if letters.is_empty() {
        out.push('-');
    } else {
        out.push_str(&letters);
    }

    out.push(' ');
    match board.en_passant() {
        Some(sq) => out.push_str(&sq.to_string()),
        None => out.push('-'),
    }

    out.push_str(&format!(
        " {} {}",
        board.halfmove_clock(),
        board.fullmove_number()
    ));
    out
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
