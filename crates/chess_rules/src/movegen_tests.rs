use super::*;
use std::collections::HashSet;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn texts(moves: &[Move]) -> HashSet<String> {
    moves.iter().map(|m| m.to_string()).collect()
}

#[test]
fn test_startpos_moves() {
    let moves = legal_moves(&Board::startpos());
    assert_eq!(moves.len(), 20);
    let set = texts(&moves);
    assert!(set.contains("e2e4"));
    assert!(set.contains("b1c3"));
    assert!(!set.contains("e1e2"));
}

#[test]
fn test_kiwipete_moves() {
    let pos = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    assert_eq!(legal_moves(&pos).len(), 48);
}

#[test]
fn test_generation_is_deterministic_and_non_mutating() {
    let pos = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = pos.clone();
    let first = legal_moves(&pos);
    let second = legal_moves(&pos);
    assert_eq!(first, second);
    assert_eq!(pos, before);

    let mut scratch = pos.clone();
    let mut buf = vec![Move::new(Square::A1, Square::A8, MoveFlag::Normal)];
    legal_moves_into(&mut scratch, &mut buf);
    assert_eq!(buf, first);
    assert_eq!(scratch, before);
}

#[test]
fn test_legal_is_subset_of_pseudo_legal() {
    let pos = board("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
    let pseudo = texts(&pseudo_legal_moves(&pos));
    let legal = texts(&legal_moves(&pos));
    assert!(legal.is_subset(&pseudo));
    // Pinned knight: its jumps are pseudo-legal only.
    assert!(pseudo.contains("e2c3"));
    assert!(!legal.contains("e2c3"));
}

#[test]
fn test_castling_available_then_gone() {
    let mut pos = board("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
    let set = texts(&legal_moves(&pos));
    assert!(set.contains("e1g1"));
    assert!(set.contains("e1c1"));

    let castle = legal_moves(&pos)
        .into_iter()
        .find(|m| m.to_string() == "e1g1")
        .unwrap();
    assert_eq!(castle.flag, MoveFlag::CastleKingside);

    // Rook h1-g1, Black replies, rook back: the right is gone for good.
    for text in ["h1g1", "a7a6", "g1h1", "a6a5"] {
        let mv = crate::notation::parse_move(&pos, text).unwrap();
        pos.apply(mv).unwrap();
    }
    let set = texts(&legal_moves(&pos));
    assert!(!set.contains("e1g1"));
    assert!(set.contains("e1c1"));
}

#[test]
fn test_castling_blocked_by_attack_or_piece() {
    // f1 is covered by the bishop on c4: no kingside castling through it.
    let pos = board("r3k2r/8/8/8/2b5/8/8/R3K2R w KQkq - 0 1");
    let set = texts(&legal_moves(&pos));
    assert!(!set.contains("e1g1"));
    assert!(set.contains("e1c1"));

    // In check: no castling at all.
    let pos = board("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1");
    let set = texts(&legal_moves(&pos));
    assert!(!set.contains("e1g1"));
    assert!(!set.contains("e1c1"));

    // Knight on b1 blocks queenside even though b1 is not on the king's path.
    let pos = board("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
    let set = texts(&legal_moves(&pos));
    assert!(!set.contains("e1c1"));
    assert!(set.contains("e1g1"));

    // b1 attacked but empty: queenside castling is still fine.
    let pos = board("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
    assert!(texts(&legal_moves(&pos)).contains("e1c1"));
}

#[test]
fn test_castling_needs_rook_on_corner() {
    let pos = board("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1");
    let set = texts(&legal_moves(&pos));
    assert!(!set.contains("e1g1"));
    assert!(!set.contains("e1c1"));
}

#[test]
fn test_en_passant_only_right_after_double_push() {
    let mut pos = board("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let ep = legal_moves(&pos)
        .into_iter()
        .find(|m| m.flag == MoveFlag::EnPassantCapture)
        .unwrap();
    assert_eq!(ep.to_string(), "e5f6");

    // White declines, Black moves, the chance is gone.
    for text in ["b1c3", "g8h6"] {
        let mv = crate::notation::parse_move(&pos, text).unwrap();
        pos.apply(mv).unwrap();
    }
    assert!(
        !legal_moves(&pos)
            .iter()
            .any(|m| m.flag == MoveFlag::EnPassantCapture)
    );
}

#[test]
fn test_en_passant_target_without_adjacent_pawn() {
    // d6 is a well-formed target, but the pawn beside it is White's own d5 pawn.
    let pos = board("rnbqkbnr/pp1p1ppp/8/2pPp3/8/8/PPP1PPPP/RNBQKBNR w KQkq d6 0 3");
    assert!(
        !legal_moves(&pos)
            .iter()
            .any(|m| m.flag == MoveFlag::EnPassantCapture)
    );
}

#[test]
fn test_en_passant_discovered_check_is_illegal() {
    // Capturing exd3 e.p. would clear the rank between the h4 rook and a4 king.
    let pos = board("8/8/8/8/k2Pp2R/8/8/4K3 b - d3 0 1");
    assert!(
        !legal_moves(&pos)
            .iter()
            .any(|m| m.flag == MoveFlag::EnPassantCapture)
    );
}

#[test]
fn test_promotion_variants() {
    let pos = board("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
    let promos: Vec<Move> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.from.to_string() == "b7")
        .collect();
    assert_eq!(promos.len(), 4);
    let kinds: HashSet<PieceKind> = promos.iter().filter_map(|m| m.promotion).collect();
    assert_eq!(
        kinds,
        HashSet::from([
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight
        ])
    );
}

#[test]
fn test_promotion_with_capture_choices() {
    // b7 can push to b8 or take on a8 / c8: 3 destinations × 4 kinds.
    let pos = board("r1n1k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
    let from_b7 = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.from.to_string() == "b7")
        .count();
    assert_eq!(from_b7, 12);
}

#[test]
fn test_double_push_flag_and_blocking() {
    let pos = board("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
    let set = texts(&legal_moves(&pos));
    // e3 is occupied: neither e2e3 nor e2e4.
    assert!(!set.contains("e2e3"));
    assert!(!set.contains("e2e4"));

    let pos = board("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
    let moves = legal_moves(&pos);
    let set = texts(&moves);
    assert!(set.contains("e2e3"));
    assert!(!set.contains("e2e4"));
}

#[test]
fn test_capture_flags() {
    let pos = board("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    let mv = legal_moves(&pos)
        .into_iter()
        .find(|m| m.to_string() == "e4d5")
        .unwrap();
    assert_eq!(mv.flag, MoveFlag::Capture);
    assert!(mv.is_capture());
}

#[test]
fn test_checkmated_side_has_no_moves() {
    let pos = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert!(legal_moves(&pos).is_empty());
    assert!(pos.is_check());
}
