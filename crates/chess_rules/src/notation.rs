//! Move text: `e2e4`, `e7e8q`.

use tracing::debug;

use crate::board::Board;
use crate::error::ChessError;
use crate::movegen::legal_moves;
use crate::types::*;

/// Move text split into its parts, not yet checked against a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveText {
    pub fn parse(txt: &str) -> Result<Self, ChessError> {
        let invalid = || ChessError::InvalidMoveText(txt.to_string());
        if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
            return Err(invalid());
        }
        let from: Square = txt[0..2].parse().map_err(|_| invalid())?;
        let to: Square = txt[2..4].parse().map_err(|_| invalid())?;
        let promotion = match txt.as_bytes().get(4) {
            None => None,
            Some(&b) => match PieceKind::from_letter(b as char) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
                _ => return Err(invalid()),
            },
        };
        Ok(MoveText {
            from,
            to,
            promotion,
        })
    }

    pub fn matches(&self, mv: &Move) -> bool {
        mv.from == self.from && mv.to == self.to && mv.promotion == self.promotion
    }
}

/// Resolve move text to the legal move it names in `board`.
///
/// We match against the legal set so the flags (castle, en passant, double
/// push) come out right.
pub fn parse_move(board: &Board, txt: &str) -> Result<Move, ChessError> {
    let text = MoveText::parse(txt)?;
    legal_moves(board)
        .into_iter()
        .find(|mv| text.matches(mv))
        .ok_or_else(|| {
            debug!(mv = txt, fen = %board.to_fen(), "move text matches no legal move");
            ChessError::IllegalMove(txt.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_flags() {
        let board = Board::startpos();
        let mv = parse_move(&board, "e2e4").unwrap();
        assert_eq!(mv.flag, MoveFlag::DoublePawnPush);
        assert_eq!(mv.to_string(), "e2e4");

        let mv = parse_move(&board, "g1f3").unwrap();
        assert_eq!(mv.flag, MoveFlag::Normal);
    }

    #[test]
    fn test_parse_castle_and_promotion() {
        let board = Board::from_fen("r3k2r/1P6/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(
            parse_move(&board, "e1c1").unwrap().flag,
            MoveFlag::CastleQueenside
        );
        let promo = parse_move(&board, "b7a8r").unwrap();
        assert_eq!(promo.promotion, Some(PieceKind::Rook));
        assert_eq!(promo.flag, MoveFlag::Capture);
    }

    #[test]
    fn test_promotion_letter_must_match() {
        let board = Board::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        // No letter on a promotion, or a letter on an ordinary move.
        assert_eq!(
            parse_move(&board, "b7b8"),
            Err(ChessError::IllegalMove("b7b8".to_string()))
        );
        assert!(matches!(
            parse_move(&board, "e1e2q"),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(parse_move(&board, "b7b8q").is_ok());
    }

    #[test]
    fn test_malformed_text() {
        let board = Board::startpos();
        for bad in ["", "e2", "e2e", "e2e4qq", "e2e9", "e2e4Q", "e2e4k", "e2e4p", "é2e4"] {
            assert_eq!(
                parse_move(&board, bad),
                Err(ChessError::InvalidMoveText(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_illegal_text() {
        let board = Board::startpos();
        assert_eq!(
            parse_move(&board, "e2e5"),
            Err(ChessError::IllegalMove("e2e5".to_string()))
        );
        assert!(parse_move(&board, "e7e5").is_err());
    }
}
