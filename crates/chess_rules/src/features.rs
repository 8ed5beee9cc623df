//! Piece-plane encoding for model training.
//!
//! Converts a board into the 8x8x12 tensor the training pipeline consumes:
//! one plane per (colour, kind), 1.0 where such a piece stands.

use crate::board::Board;
use crate::types::{Color, Piece};

/// 12 planes: 6 piece kinds × 2 colours
pub const NUM_PLANES: usize = 12;

/// Total number of features: 8 × 8 × 12 = 768
pub const NUM_FEATURES: usize = 64 * NUM_PLANES;

/// Plane for a piece: 0-5 White P,N,B,R,Q,K then 6-11 Black.
pub fn plane_index(piece: Piece) -> usize {
    let color_offset = match piece.color {
        Color::White => 0,
        Color::Black => 6,
    };
    piece.kind.idx() + color_offset
}

/// Flat `[rank][file][plane]` tensor, always from White's side (a1 first).
pub fn board_tensor(board: &Board) -> Vec<f32> {
    let mut features = vec![0.0f32; NUM_FEATURES];
    for (sq, piece) in board.pieces() {
        features[sq.index() * NUM_PLANES + plane_index(piece)] = 1.0;
    }
    features
}
