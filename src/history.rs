//! Snapshot history for undoing committed turns.

use crate::board::Board;

/// Append-only stack of board snapshots, one per committed half-move, on top of the board the game started from.
///
/// Snapshots are deep copies owned by the history and are only handed out as clones.
#[derive(Clone, Debug)]
pub struct BoardHistory {
    fresh: Board,
    snapshots: Vec<Board>,
}

impl BoardHistory {
    pub fn new(fresh: &Board) -> Self {
        Self { fresh: fresh.clone_board(), snapshots: Vec::new() }
    }

    /// Replaces the board returned once every snapshot has been undone.
    pub fn set_fresh_board(&mut self, board: &Board) {
        self.fresh = board.clone_board();
    }

    /// Stores a copy of `board` as the latest position.
    pub fn record(&mut self, board: &Board) {
        self.snapshots.push(board.clone_board());
    }

    /// Drops up to `half_moves` snapshots and returns a copy of the position that is now the latest.
    pub fn undo(&mut self, half_moves: usize) -> Board {
        let keep = self.snapshots.len().saturating_sub(half_moves);
        self.snapshots.truncate(keep);
        self.latest().clone_board()
    }

    /// The latest recorded position, or the fresh board when nothing has been recorded.
    pub fn latest(&self) -> &Board {
        self.snapshots.last().unwrap_or(&self.fresh)
    }

    /// Number of recorded half-moves.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn play(board: &mut Board, from: Square, to: Square) {
        board.apply_move(from, to).unwrap();
        board.end_turn().unwrap();
    }

    #[test]
    fn undo_restores_previous_positions() {
        let start = Board::startpos();
        let mut history = BoardHistory::new(&start);
        let mut board = start.clone();

        play(&mut board, Square::E2, Square::E4);
        history.record(&board);
        let after_e4 = board.clone();
        play(&mut board, Square::E7, Square::E5);
        history.record(&board);
        assert_eq!(history.len(), 2);

        assert_eq!(history.undo(1), after_e4);
        assert_eq!(history.undo(1), start);
        assert!(history.is_empty());
    }

    #[test]
    fn undo_past_the_start_returns_fresh_board() {
        let start = Board::startpos();
        let mut history = BoardHistory::new(&start);
        let mut board = start.clone();
        play(&mut board, Square::G1, Square::F3);
        history.record(&board);

        assert_eq!(history.undo(5), start);
        assert_eq!(history.undo(1), start);
    }

    #[test]
    fn snapshots_do_not_follow_the_live_board() {
        let start = Board::startpos();
        let mut history = BoardHistory::new(&start);
        let mut board = start.clone();
        history.record(&board);
        board.remove_piece(Square::A2).unwrap();
        assert!(history.latest().has_piece(Square::A2));
    }
}
