//! Serializable command results for `--json` output.

use chess_rules::{Board, Color, GameStatus, Move};
use serde::Serialize;

pub fn status_name(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing => "ongoing",
        GameStatus::Check => "check",
        GameStatus::Checkmate => "checkmate",
        GameStatus::Stalemate => "stalemate",
        GameStatus::DrawByFiftyMoveRule => "draw_fifty_move_rule",
        GameStatus::DrawByInsufficientMaterial => "draw_insufficient_material",
        GameStatus::DrawByThreefoldRepetition => "draw_threefold_repetition",
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Legal moves in text form, sorted so output is stable.
pub fn sorted_move_texts(moves: &[Move]) -> Vec<String> {
    let mut texts: Vec<String> = moves.iter().map(Move::to_string).collect();
    texts.sort();
    texts
}

#[derive(Debug, Serialize)]
pub struct MovesReport {
    pub fen: String,
    pub count: usize,
    pub moves: Vec<String>,
}

impl MovesReport {
    pub fn new(board: &Board, moves: &[Move]) -> Self {
        Self {
            fen: board.to_fen(),
            count: moves.len(),
            moves: sorted_move_texts(moves),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub fen: String,
    pub side_to_move: &'static str,
    pub status: &'static str,
    pub in_check: bool,
    pub legal_moves: usize,
    pub halfmove_clock: u32,
}

impl StatusReport {
    pub fn new(board: &Board, status: GameStatus, legal_moves: usize) -> Self {
        Self {
            fen: board.to_fen(),
            side_to_move: color_name(board.side_to_move()),
            status: status_name(status),
            in_check: board.is_check(),
            legal_moves,
            halfmove_clock: board.halfmove_clock(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayReport {
    pub played: Vec<String>,
    pub fen: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DivideEntry {
    #[serde(rename = "move")]
    pub mv: String,
    pub nodes: u64,
}

#[derive(Debug, Serialize)]
pub struct PerftReport {
    pub fen: String,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divide: Option<Vec<DivideEntry>>,
}

#[derive(Debug, Serialize)]
pub struct ReplyReport {
    pub request: String,
    #[serde(rename = "move")]
    pub mv: String,
    pub evaluation: Option<f32>,
    pub fen: String,
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::legal_moves;

    #[test]
    fn test_moves_report_is_sorted() {
        let board = Board::startpos();
        let report = MovesReport::new(&board, &legal_moves(&board));
        assert_eq!(report.count, 20);
        assert_eq!(report.moves.first().map(String::as_str), Some("a2a3"));
        assert_eq!(report.moves.last().map(String::as_str), Some("h2h4"));
    }

    #[test]
    fn test_status_report_json() {
        let board = Board::startpos();
        let report = StatusReport::new(&board, GameStatus::Ongoing, 20);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "ongoing");
        assert_eq!(json["side_to_move"], "white");
        assert_eq!(json["in_check"], false);
        assert_eq!(json["legal_moves"], 20);
    }

    #[test]
    fn test_divide_entry_field_name() {
        let entry = DivideEntry {
            mv: "e2e4".to_string(),
            nodes: 600,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"move":"e2e4","nodes":600}"#);
    }
}
