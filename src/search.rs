//! Fixed-depth minimax search.
//!
//! A `Search` owns one clone of the caller's board and walks the whole move tree to the configured depth with
//! make/unmake, so sibling branches never observe each other. There is no pruning, no cancellation and no
//! iterative deepening: `run` always visits every node.

use log::{debug, trace};

use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::eval::eval_position;
use crate::movegen::{MoveList, generate_all_moves, is_in_check};
use crate::moves::Move;
use crate::types::{Color, PieceType};

/// Default search depth in half-moves.
pub const DEFAULT_DEPTH: u8 = 4;

/// Score of a mate at the root; mates found deeper score slightly less.
pub const MATE_SCORE: i32 = 100_000;

/// Outcome of a completed search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Best first move, `None` when the searching side has no legal move.
    pub best: Option<Move>,
    /// Value of `best` from the searching side's point of view.
    pub score: i32,
    pub nodes: u64,
}

/// One search run. Building it clones the board; `run` consumes it.
pub struct Search {
    board: Board,
    color: Color,
    depth: u8,
    nodes: u64,
}

impl Search {
    pub fn new(board: &Board, color: Color, depth: u8) -> ChessResult<Self> {
        if depth == 0 {
            return Err(ChessError::InvalidDepth(depth));
        }
        Ok(Self { board: board.clone_board(), color, depth, nodes: 0 })
    }

    /// Searches every line to the configured depth and returns the best first move.
    ///
    /// Ties keep the move found first, so the result only depends on board, color and depth.
    pub fn run(mut self) -> ChessResult<SearchResult> {
        debug!("search start: {:?} to move, depth {}", self.color, self.depth);

        let mut root = MoveList::new();
        generate_all_moves(&mut self.board, self.color, &mut root)?;

        let mut best = None;
        let mut best_score = i32::MIN;
        for &m in root.iter() {
            self.play(m)?;
            let score = self.minimax(1, !self.color)?;
            self.board.unmake_move()?;

            trace!("root move {m}: {score}");
            if score > best_score {
                best_score = score;
                best = Some(m);
            }
        }

        let score = match best {
            Some(_) => best_score,
            None => self.terminal_score(0, self.color)?,
        };
        debug!("search done: best {best:?}, score {score}, {} nodes", self.nodes);
        Ok(SearchResult { best, score, nodes: self.nodes })
    }

    /// Makes a move on the working board, promoting to a queen when the move reaches the back rank.
    fn play(&mut self, m: Move) -> ChessResult<()> {
        self.board.make_move(m.from(), m.to())?;
        if self.board.pending_promotion().is_some() {
            self.board.promote(PieceType::Queen)?;
        }
        Ok(())
    }

    fn minimax(&mut self, ply: u8, to_move: Color) -> ChessResult<i32> {
        self.nodes += 1;
        if ply >= self.depth {
            return Ok(self.leaf_score());
        }

        let mut list = MoveList::new();
        generate_all_moves(&mut self.board, to_move, &mut list)?;
        if list.is_empty() {
            return self.terminal_score(ply, to_move);
        }

        let maximizing = to_move == self.color;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for &m in list.iter() {
            self.play(m)?;
            let score = self.minimax(ply + 1, !to_move)?;
            self.board.unmake_move()?;

            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        Ok(best)
    }

    /// Material from the searching side's point of view.
    fn leaf_score(&self) -> i32 {
        let score = eval_position(&self.board);
        match self.color {
            Color::White => score,
            Color::Black => -score,
        }
    }

    /// Score of a node where `to_move` has no legal move: mate against the side in check, otherwise a draw.
    fn terminal_score(&self, ply: u8, to_move: Color) -> ChessResult<i32> {
        if !is_in_check(&self.board, to_move)? {
            return Ok(0);
        }
        let mate = MATE_SCORE - ply as i32;
        Ok(if to_move == self.color { -mate } else { mate })
    }
}

/// Best first move for `color` searched `depth` half-moves deep, `None` if `color` cannot move.
pub fn best_move(board: &Board, color: Color, depth: u8) -> ChessResult<Option<Move>> {
    Ok(Search::new(board, color, depth)?.run()?.best)
}
