use crate::{board::Board, movegen::legal_moves_into, types::Move};

/// Pure perft node count.
/// Counts all legal move paths from the current position down to `depth`.
pub fn perft(board: &mut Board, depth: u8) -> u64 {
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    count(board, depth, &mut layers[..])
}

/// Perft split by root move, for locating a miscounted subtree.
pub fn divide(board: &mut Board, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(board, &mut roots);

    let mut layers = vec![Vec::with_capacity(64); depth as usize - 1];
    roots
        .into_iter()
        .map(|mv| {
            let undo = board.make_move(mv);
            let nodes = count(board, depth - 1, &mut layers[..]);
            board.unmake_move(undo);
            (mv, nodes)
        })
        .collect()
}

/// One move buffer per remaining ply, reused across siblings.
fn count(board: &mut Board, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
    if depth == 0 {
        return 1;
    }
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };

    legal_moves_into(board, buf);
    if depth == 1 {
        return buf.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in buf.iter().copied() {
        let undo = board.make_move(mv);
        nodes += count(board, depth - 1, rest);
        board.unmake_move(undo);
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_startpos_shallow() {
        let mut board = Board::startpos();
        assert_eq!(perft(&mut board, 0), 1);
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let mut board = Board::startpos();
        let split = divide(&mut board, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8902);
        assert!(divide(&mut board, 0).is_empty());
    }
}
