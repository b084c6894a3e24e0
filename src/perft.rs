use log::debug;

use crate::board::Board;
use crate::error::ChessResult;
use crate::movegen::{MoveList, generate_all_moves};
use crate::moves::Move;
use crate::types::{Color, PieceType};

/// Counts the leaves of the legal move tree `depth` half-moves deep, `color` moving first.
///
/// A promotion counts once and continues with a queen.
pub fn perft(board: &mut Board, color: Color, depth: u32) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let mut list = MoveList::new();
    generate_all_moves(board, color, &mut list)?;
    if depth == 1 {
        return Ok(list.len() as u64);
    }

    let mut nodes = 0;
    for m in list.iter() {
        make(board, *m)?;
        nodes += perft(board, !color, depth - 1)?;
        board.unmake_move()?;
    }

    Ok(nodes)
}

/// Leaf count below each root move, in generation order.
///
/// Depth 0 has no root moves to split by, so the result is empty.
pub fn perft_divide(board: &mut Board, color: Color, depth: u32) -> ChessResult<Vec<(Move, u64)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }
    let mut list = MoveList::new();
    generate_all_moves(board, color, &mut list)?;

    let mut split = Vec::with_capacity(list.len());
    for m in list.iter() {
        make(board, *m)?;
        let nodes = perft(board, !color, depth - 1)?;
        board.unmake_move()?;
        debug!("{m}: {nodes}");
        split.push((*m, nodes));
    }
    Ok(split)
}

fn make(board: &mut Board, m: Move) -> ChessResult<()> {
    board.make_move(m.from(), m.to())?;
    if board.pending_promotion().is_some() {
        board.promote(PieceType::Queen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_counts() {
        let mut board = Board::startpos();
        assert_eq!(perft(&mut board, Color::White, 1), Ok(20));
        assert_eq!(perft(&mut board, Color::White, 2), Ok(400));
        assert_eq!(perft(&mut board, Color::White, 3), Ok(8902));
        assert_eq!(board, Board::startpos());
    }

    #[test]
    fn divide_sums_to_total() {
        let mut board = Board::startpos();
        let split = perft_divide(&mut board, Color::White, 2).unwrap();
        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|&(_, n)| n == 20));
    }

    #[test]
    fn divide_at_depth_zero_is_empty() {
        let mut board = Board::startpos();
        assert_eq!(perft_divide(&mut board, Color::White, 0), Ok(Vec::new()));
        assert_eq!(perft(&mut board, Color::White, 0), Ok(1));
    }
}
