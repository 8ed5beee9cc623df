use crate::attacks::{bishop_attacks, is_attacked, king_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the board only once.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut tmp = board.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Each pseudo-legal move is played on `board` and taken back again; the
/// board is left exactly as it was passed in.
pub fn legal_moves_into(board: &mut Board, out: &mut Vec<Move>) {
    out.clear();
    pseudo_legal_moves_into(board, out);

    let mover = board.side_to_move();
    out.retain(|&mv| {
        let undo = board.make_move(mv);
        let illegal = board.in_check(mover);
        board.unmake_move(undo);
        !illegal
    });
}

/// Moves that obey piece movement rules but may leave the mover's king
/// attacked. Castling is already checked for passing through attack.
pub fn pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_legal_moves_into(board, &mut out);
    out
}

pub fn pseudo_legal_moves_into(board: &Board, out: &mut Vec<Move>) {
    let us = board.side_to_move();
    let occupied = board.occupied();
    for from in board.occupancy(us) {
        let Some(pc) = board.piece_at(from) else {
            continue;
        };
        match pc.kind {
            PieceKind::Pawn => gen_pawn(board, from, us, out),
            PieceKind::Knight => gen_targets(board, from, knight_attacks(from), out),
            PieceKind::Bishop => gen_targets(board, from, bishop_attacks(from, occupied), out),
            PieceKind::Rook => gen_targets(board, from, rook_attacks(from, occupied), out),
            PieceKind::Queen => gen_targets(board, from, queen_attacks(from, occupied), out),
            PieceKind::King => {
                gen_targets(board, from, king_attacks(from), out);
                gen_castle(board, from, us, out);
            }
        }
    }
}

/// Emit a move to every square in `targets` not held by the mover.
fn gen_targets(board: &Board, from: Square, targets: Bitboard, out: &mut Vec<Move>) {
    let us = board.side_to_move();
    let theirs = board.occupancy(us.other());
    for to in targets & !board.occupancy(us) {
        let flag = if theirs.contains(to) {
            MoveFlag::Capture
        } else {
            MoveFlag::Normal
        };
        out.push(Move::new(from, to, flag));
    }
}

fn push_pawn_move(from: Square, to: Square, flag: MoveFlag, c: Color, out: &mut Vec<Move>) {
    if to.rank() == c.other().back_rank() {
        for kind in PieceKind::PROMOTIONS {
            out.push(Move::new(from, to, flag).with_promotion(kind));
        }
    } else {
        out.push(Move::new(from, to, flag));
    }
}

fn gen_pawn(board: &Board, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();
    let start_rank = match c {
        Color::White => 1,
        Color::Black => 6,
    };

    // forward 1, then 2 from the start rank
    if let Some(to) = from.offset(0, dir)
        && board.piece_at(to).is_none()
    {
        push_pawn_move(from, to, MoveFlag::Normal, c, out);

        if from.rank() == start_rank
            && let Some(to2) = from.offset(0, 2 * dir)
            && board.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2, MoveFlag::DoublePawnPush));
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        match board.piece_at(to) {
            Some(target) if target.color != c => {
                push_pawn_move(from, to, MoveFlag::Capture, c, out);
            }
            Some(_) => {}
            None if board.en_passant() == Some(to) => {
                // The pawn that just double-pushed sits beside us, behind the target.
                let victim = to.offset(0, -dir).and_then(|s| board.piece_at(s));
                if victim == Some(Piece::new(c.other(), PieceKind::Pawn)) {
                    out.push(Move::new(from, to, MoveFlag::EnPassantCapture));
                }
            }
            None => {}
        }
    }
}

/// King and rook squares for one castling move.
pub(crate) struct CastlePath {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty between king and rook.
    pub between: &'static [Square],
    /// Squares the king stands on, crosses, or lands on.
    pub king_path: [Square; 3],
}

pub(crate) fn castle_path(c: Color, kingside: bool) -> CastlePath {
    match (c, kingside) {
        (Color::White, true) => CastlePath {
            king_from: Square::E1,
            king_to: Square::G1,
            rook_from: Square::H1,
            rook_to: Square::F1,
            between: &[Square::F1, Square::G1],
            king_path: [Square::E1, Square::F1, Square::G1],
        },
        (Color::White, false) => CastlePath {
            king_from: Square::E1,
            king_to: Square::C1,
            rook_from: Square::A1,
            rook_to: Square::D1,
            between: &[Square::D1, Square::C1, Square::B1],
            king_path: [Square::E1, Square::D1, Square::C1],
        },
        (Color::Black, true) => CastlePath {
            king_from: Square::E8,
            king_to: Square::G8,
            rook_from: Square::H8,
            rook_to: Square::F8,
            between: &[Square::F8, Square::G8],
            king_path: [Square::E8, Square::F8, Square::G8],
        },
        (Color::Black, false) => CastlePath {
            king_from: Square::E8,
            king_to: Square::C8,
            rook_from: Square::A8,
            rook_to: Square::D8,
            between: &[Square::D8, Square::C8, Square::B8],
            king_path: [Square::E8, Square::D8, Square::C8],
        },
    }
}

fn gen_castle(board: &Board, from: Square, c: Color, out: &mut Vec<Move>) {
    let rights = board.castling_rights();
    let enemy = c.other();
    for (kingside, allowed, flag) in [
        (true, rights.kingside(c), MoveFlag::CastleKingside),
        (false, rights.queenside(c), MoveFlag::CastleQueenside),
    ] {
        if !allowed {
            continue;
        }
        let path = castle_path(c, kingside);
        // Castling out of, through, or into check is never allowed.
        if from == path.king_from
            && board.piece_at(path.rook_from) == Some(Piece::new(c, PieceKind::Rook))
            && path.between.iter().all(|&s| board.piece_at(s).is_none())
            && !path.king_path.iter().any(|&s| is_attacked(board, s, enemy))
        {
            out.push(Move::new(path.king_from, path.king_to, flag));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
