use super::*;
use crate::board::STARTPOS_FEN;

fn play_all(game: &mut Game, moves: &[&str]) {
    for text in moves {
        game.play_text(text).unwrap();
    }
}

#[test]
fn test_play_and_undo_sequence() {
    let mut game = Game::default();
    play_all(&mut game, &["e2e4", "e7e5", "g1f3"]);
    assert_eq!(
        game.fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
    let played: Vec<String> = game.moves().map(|m| m.to_string()).collect();
    assert_eq!(played, ["e2e4", "e7e5", "g1f3"]);

    assert_eq!(game.undo().unwrap().to_string(), "g1f3");
    assert_eq!(game.undo().unwrap().to_string(), "e7e5");
    assert_eq!(game.undo().unwrap().to_string(), "e2e4");
    assert_eq!(game.fen(), STARTPOS_FEN);
    assert_eq!(game.undo(), Err(ChessError::UndoUnderflow));
    assert_eq!(game.fen(), STARTPOS_FEN);
}

#[test]
fn test_illegal_text_does_not_advance() {
    let mut game = Game::default();
    assert!(game.play_text("e2e5").is_err());
    assert!(game.play_text("zz").is_err());
    assert_eq!(game.moves().count(), 0);
    assert_eq!(game.fen(), STARTPOS_FEN);
}

#[test]
fn test_threefold_repetition() {
    let mut game = Game::default();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play_all(&mut game, &shuffle);
    assert_eq!(game.repetitions(), 2);
    assert_eq!(game.status(), GameStatus::Ongoing);

    play_all(&mut game, &shuffle);
    assert_eq!(game.repetitions(), 3);
    assert_eq!(game.status(), GameStatus::DrawByThreefoldRepetition);

    // Taking a move back leaves the repetition behind.
    game.undo().unwrap();
    assert_ne!(game.status(), GameStatus::DrawByThreefoldRepetition);
}

#[test]
fn test_irreversible_move_resets_repetition_window() {
    let mut game = Game::default();
    play_all(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8", "e2e4", "e7e5"]);
    play_all(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(game.repetitions(), 2);
}

#[test]
fn test_status_reports_mate() {
    let mut game = Game::default();
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_from_fen_rejects_bad_input() {
    assert!(Game::from_fen("not a fen").is_err());
    let game = Game::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    assert_eq!(game.status(), GameStatus::DrawByInsufficientMaterial);
}
