//! Static position evaluation.
//!
//! Scores are signed and White-positive: above zero favours White, below zero favours Black.

use crate::board::Board;
use crate::types::{Color, PieceType};

const PAWN: i32 = 1;
const KNIGHT: i32 = 3;
const BISHOP: i32 = 3;
const ROOK: i32 = 5;
const QUEEN: i32 = 9;
const KING: i32 = 0;

/// Material value of a figure.
#[inline(always)]
pub const fn piece_value(kind: PieceType) -> i32 {
    match kind {
        PieceType::Pawn => PAWN,
        PieceType::Knight => KNIGHT,
        PieceType::Bishop => BISHOP,
        PieceType::Rook => ROOK,
        PieceType::Queen => QUEEN,
        PieceType::King => KING,
    }
}

/// Leaf score used by the search.
pub fn eval_position(board: &Board) -> i32 {
    eval_material(board)
}

/// White material minus Black material.
pub fn eval_material(board: &Board) -> i32 {
    side_material(board, Color::White) - side_material(board, Color::Black)
}

pub fn side_material(board: &Board, color: Color) -> i32 {
    board.pieces(color).map(|p| piece_value(p.kind)).sum()
}
