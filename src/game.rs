//! Game facade: the live board plus its history, with legality enforced on every move.

use log::debug;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::error::{ChessError, ChessResult};
use crate::history::BoardHistory;
use crate::movegen::{has_legal_move, is_in_check, possible_moves};
use crate::moves::Move;
use crate::search::best_move;
use crate::types::{Color, Piece, PieceType, Square};

/// State of the game for the side to move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

pub struct Game {
    board: Board,
    history: BoardHistory,
}

impl Game {
    /// New game from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::startpos())
    }

    /// New game from an arbitrary position.
    pub fn from_board(board: Board) -> Self {
        let history = BoardHistory::new(&board);
        Self { board, history }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &BoardHistory {
        &self.history
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Legal destinations of the piece on `from`.
    pub fn legal_moves(&mut self, from: Square) -> ChessResult<Bitboard> {
        possible_moves(&mut self.board, from)
    }

    /// Plays a move for the side to move.
    ///
    /// The turn is committed right away unless the move leaves a pawn waiting for promotion, in which case
    /// [`Game::promote`] commits it.
    pub fn play(&mut self, from: Square, to: Square) -> ChessResult<Option<Piece>> {
        if let Some(sq) = self.board.pending_promotion() {
            return Err(ChessError::PromotionPending(sq));
        }
        if self.board.piece_at(from)?.color != self.board.side_to_move() {
            return Err(ChessError::NotYourTurn(from));
        }
        if !possible_moves(&mut self.board, from)?.contains(to) {
            return Err(ChessError::IllegalMove { from, to });
        }

        let captured = self.board.apply_move(from, to)?;
        debug!("{:?} plays {}", self.board.side_to_move(), Move::new(from, to));
        if self.board.pending_promotion().is_none() {
            self.commit()?;
        }
        Ok(captured)
    }

    /// Resolves a pending promotion and commits the turn.
    pub fn promote(&mut self, kind: PieceType) -> ChessResult<()> {
        self.board.promote(kind)?;
        self.commit()
    }

    fn commit(&mut self) -> ChessResult<()> {
        self.board.end_turn()?;
        self.history.record(&self.board);
        Ok(())
    }

    /// Takes back up to `half_moves` committed turns.
    ///
    /// Refused while a promotion is pending: that pawn move is not committed yet, so resolve it first.
    pub fn undo(&mut self, half_moves: usize) -> ChessResult<()> {
        if let Some(sq) = self.board.pending_promotion() {
            return Err(ChessError::PromotionPending(sq));
        }
        self.board = self.history.undo(half_moves);
        debug!("undo {half_moves} half-moves, turn {} now", self.board.turn());
        Ok(())
    }

    /// Check, checkmate or stalemate for the side to move.
    pub fn status(&mut self) -> ChessResult<GameStatus> {
        let color = self.board.side_to_move();
        let in_check = is_in_check(&self.board, color)?;
        let status = match (in_check, has_legal_move(&mut self.board, color)?) {
            (true, false) => GameStatus::Checkmate { winner: !color },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Ongoing,
        };
        if status.is_over() {
            debug!("game over: {status:?}");
        }
        Ok(status)
    }

    /// Engine move for the side to move, searched `depth` half-moves deep on a copy of the board.
    pub fn best_move(&self, depth: u8) -> ChessResult<Option<Move>> {
        best_move(&self.board, self.board.side_to_move(), depth)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(game: &mut Game, moves: &[&str]) {
        for m in moves {
            let m: Move = m.parse().unwrap();
            game.play(m.from(), m.to()).unwrap();
        }
    }

    #[test]
    fn enforces_turn_order_and_legality() {
        let mut game = Game::new();
        assert_eq!(game.play(Square::E7, Square::E5), Err(ChessError::NotYourTurn(Square::E7)));
        assert_eq!(
            game.play(Square::E2, Square::E5),
            Err(ChessError::IllegalMove { from: Square::E2, to: Square::E5 })
        );
        assert_eq!(game.play(Square::E4, Square::E5), Err(ChessError::EmptySquare(Square::E4)));
        assert_eq!(game.board(), &Board::startpos());

        game.play(Square::E2, Square::E4).unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.board().turn(), 1);
    }

    #[test]
    fn fools_mate() {
        let mut game = Game::new();
        play_all(&mut game, &["f2f3", "e7e5", "g2g4"]);
        assert_eq!(game.status(), Ok(GameStatus::Ongoing));
        play_all(&mut game, &["d8h4"]);
        assert_eq!(game.status(), Ok(GameStatus::Checkmate { winner: Color::Black }));
    }

    #[test]
    fn undo_takes_back_turns() {
        let mut game = Game::new();
        play_all(&mut game, &["e2e4", "e7e5", "g1f3"]);
        let after_two = {
            let mut g = Game::new();
            play_all(&mut g, &["e2e4", "e7e5"]);
            g.board().clone()
        };
        game.undo(1).unwrap();
        assert_eq!(game.board(), &after_two);
        assert_eq!(game.side_to_move(), Color::White);
        game.undo(10).unwrap();
        assert_eq!(game.board(), &Board::startpos());
    }

    #[test]
    fn promotion_commits_the_turn() {
        let mut board = Board::empty();
        board.place_piece(PieceType::King, Color::White, Square::E1).unwrap();
        board.place_piece(PieceType::King, Color::Black, Square::H6).unwrap();
        board.place_piece(PieceType::Pawn, Color::White, Square::B7).unwrap();
        let mut game = Game::from_board(board);

        game.play(Square::B7, Square::B8).unwrap();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.play(Square::E1, Square::D1), Err(ChessError::PromotionPending(Square::B8)));
        assert_eq!(game.undo(1), Err(ChessError::PromotionPending(Square::B8)));
        assert_eq!(game.history().len(), 0);
        game.promote(PieceType::Rook).unwrap();
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.board().piece_at(Square::B8).map(|p| p.kind), Ok(PieceType::Rook));
        assert_eq!(game.history().len(), 1);
    }
}
