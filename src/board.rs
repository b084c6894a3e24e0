//! Chessboard representation
//!
//! This module contains the implementation of the Board object: a flat mailbox of piece ids over a fixed-capacity
//! piece pool, the per-color rosters of live pieces, castling rights, the en-passant target and turn bookkeeping.
//! Moves are made and unmade through a stack of `State` records, so the search and the king-safety probe can mutate
//! one board in place and restore it exactly.

use std::fmt;

use crate::error::{ChessError, ChessResult};
use crate::types::{CastleSide, Color, Piece, PieceType, Square, king_origin};

/// Index of a piece inside the board's pool.
pub type PieceId = u8;

/// Capacity of the piece pool. Captured pieces keep their slot so that unmake can restore them.
pub const MAX_PIECES: usize = 32;

#[rustfmt::skip]
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook, PieceType::Knight, PieceType::Bishop, PieceType::Queen,
    PieceType::King, PieceType::Bishop, PieceType::Knight, PieceType::Rook,
];

/// Castling rights packed as `K Q k q` in the four low bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline(always)]
    const fn bit(color: Color, side: CastleSide) -> u8 {
        let side_bit = match side {
            CastleSide::KingSide => 0,
            CastleSide::QueenSide => 1,
        };
        1 << (color as u8 * 2 + side_bit)
    }

    #[inline(always)]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }

    #[inline(always)]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit(color, side);
    }

    #[inline(always)]
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::KingSide);
        self.revoke(color, CastleSide::QueenSide);
    }

    fn grant(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::bit(color, side);
    }
}

/// A captured piece together with where it has to go back on unmake.
#[derive(Copy, Clone, Debug)]
struct Capture {
    id: PieceId,
    square: Square,
    roster_index: usize,
}

/// Incremental game state information.
///
/// This structure stores the minimal information required to unmake a move and restore the previous position.
/// It is pushed onto `state_stack` during move execution.
#[derive(Copy, Clone, Debug)]
struct State {
    from: Square,
    to: Square,
    moved: PieceId,
    captured: Option<Capture>,
    rook_move: Option<(Square, Square)>,
    promoted: bool,
    castling: CastlingRights,
    en_passant: Option<Square>,
    pending_promotion: Option<Square>,
}

/// Chess board representation.
///
/// The square grid (`mailbox`) and the per-color rosters always describe the same set of live pieces, and every
/// live piece's recorded square is the square holding its id. Cloning gives a fully independent board.
#[derive(Clone)]
pub struct Board {
    mailbox: [Option<PieceId>; 64],
    pool: [Option<Piece>; MAX_PIECES],
    pool_len: usize,
    roster: [Vec<PieceId>; 2], //Live pieces per color, in placement order
    kings: [Option<PieceId>; 2],
    castling: CastlingRights,
    en_passant: Option<Square>,
    pending_promotion: Option<Square>,
    side_to_move: Color,
    turn: u32,

    state_stack: Vec<State>, //Undo records of the moves made since the last committed turn
}

impl Board {
    /// Board with no pieces, no castling rights and White to move.
    pub fn empty() -> Self {
        Self {
            mailbox: [None; 64],
            pool: [None; MAX_PIECES],
            pool_len: 0,
            roster: [Vec::with_capacity(16), Vec::with_capacity(16)],
            kings: [None; 2],
            castling: CastlingRights::NONE,
            en_passant: None,
            pending_promotion: None,
            side_to_move: Color::White,
            turn: 0,
            state_stack: Vec::new(),
        }
    }

    /// Board in the standard starting layout.
    pub fn startpos() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                board.place_unchecked(kind, color, Square::new(color.home_rank() * 8 + file as u8));
            }
            for file in 0..8 {
                board.place_unchecked(PieceType::Pawn, color, Square::new(color.pawn_rank() * 8 + file));
            }
        }
        board.castling = CastlingRights::ALL;
        board
    }

    fn place_unchecked(&mut self, kind: PieceType, color: Color, sq: Square) -> PieceId {
        let id = self.pool_len as PieceId;
        self.pool[self.pool_len] = Some(Piece::new(kind, color, sq));
        self.pool_len += 1;
        self.mailbox[sq] = Some(id);
        self.roster[color].push(id);
        if kind == PieceType::King {
            self.kings[color] = Some(id);
        }
        id
    }

    /// Puts a new piece on an empty square.
    ///
    /// Fails with `OccupiedSquare` if the square holds a piece and with `InconsistentState` for a second king of
    /// the same color or when the piece pool is exhausted.
    pub fn place_piece(&mut self, kind: PieceType, color: Color, sq: Square) -> ChessResult<PieceId> {
        if self.mailbox[sq].is_some() {
            return Err(ChessError::OccupiedSquare(sq));
        }
        if kind == PieceType::King && self.kings[color].is_some() {
            return Err(ChessError::InconsistentState("a color can only have one king"));
        }
        if self.pool_len == MAX_PIECES {
            return Err(ChessError::InconsistentState("piece pool exhausted"));
        }
        Ok(self.place_unchecked(kind, color, sq))
    }

    /// Takes a piece off the board for good. Kings cannot be removed.
    pub fn remove_piece(&mut self, sq: Square) -> ChessResult<Piece> {
        let id = self.mailbox[sq].ok_or(ChessError::EmptySquare(sq))?;
        let piece = self.piece_by_id(id)?;
        if piece.kind == PieceType::King {
            return Err(ChessError::KingRemoval(piece.color));
        }
        self.unlink(id, piece)?;
        Ok(piece)
    }

    /// Grants a castling right while setting up a position.
    pub fn grant_castling(&mut self, color: Color, side: CastleSide) {
        self.castling.grant(color, side);
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline(always)]
    fn piece_by_id(&self, id: PieceId) -> ChessResult<Piece> {
        self.pool
            .get(id as usize)
            .copied()
            .flatten()
            .ok_or(ChessError::InconsistentState("piece id without pool entry"))
    }

    /// Returns the piece on `sq`, if any.
    #[inline(always)]
    pub fn occupant(&self, sq: Square) -> Option<&Piece> {
        self.mailbox[sq].and_then(|id| self.pool[id as usize].as_ref())
    }

    /// Returns the piece on `sq`, failing with `EmptySquare` when there is none.
    pub fn piece_at(&self, sq: Square) -> ChessResult<&Piece> {
        self.occupant(sq).ok_or(ChessError::EmptySquare(sq))
    }

    #[inline(always)]
    pub fn has_piece(&self, sq: Square) -> bool {
        self.mailbox[sq].is_some()
    }

    /// Live pieces of `color` in roster order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.roster[color].iter().filter_map(|&id| self.pool[id as usize].as_ref())
    }

    /// Number of live pieces of `color`.
    #[inline(always)]
    pub fn piece_count(&self, color: Color) -> usize {
        self.roster[color].len()
    }

    /// The `index`-th live piece of `color` in roster order.
    #[inline(always)]
    pub fn nth_piece(&self, color: Color, index: usize) -> Option<&Piece> {
        self.roster[color].get(index).and_then(|&id| self.pool[id as usize].as_ref())
    }

    /// Returns the king of `color`; a missing king means the board was never set up properly.
    pub fn king(&self, color: Color) -> ChessResult<&Piece> {
        self.kings[color]
            .and_then(|id| self.pool[id as usize].as_ref())
            .ok_or(ChessError::InconsistentState("missing king"))
    }

    #[inline(always)]
    pub fn king_square(&self, color: Color) -> ChessResult<Square> {
        self.king(color).map(Piece::square)
    }

    #[inline(always)]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline(always)]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castling.has(color, side)
    }

    /// Returns the en-passant capture square, if existing.
    #[inline(always)]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant
    }

    /// Square of a pawn waiting for its promotion figure.
    #[inline(always)]
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Number of committed half-moves.
    #[inline(always)]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Number of moves that can currently be unmade.
    #[inline(always)]
    pub fn undo_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Deep copy of the board.
    pub fn clone_board(&self) -> Board {
        self.clone()
    }

    /// Removes a live piece from the grid and its roster, returning where it has to go back.
    fn unlink(&mut self, id: PieceId, piece: Piece) -> ChessResult<Capture> {
        let roster = &mut self.roster[piece.color];
        let roster_index = roster
            .iter()
            .position(|&p| p == id)
            .ok_or(ChessError::InconsistentState("live piece missing from roster"))?;
        roster.remove(roster_index);
        self.mailbox[piece.square()] = None;
        Ok(Capture { id, square: piece.square(), roster_index })
    }

    fn relink(&mut self, capture: Capture) -> ChessResult<()> {
        let piece = self.piece_by_id(capture.id)?;
        self.roster[piece.color].insert(capture.roster_index, capture.id);
        self.mailbox[capture.square] = Some(capture.id);
        Ok(())
    }

    #[inline(always)]
    fn relocate(&mut self, id: PieceId, from: Square, to: Square) {
        self.mailbox[from] = None;
        self.mailbox[to] = Some(id);
        if let Some(piece) = self.pool[id as usize].as_mut() {
            piece.set_square(to);
        }
    }

    /// Applies a move for the caller, refusing while a promotion is still pending.
    ///
    /// Returns the captured piece, if any. Legality is the caller's business: check the destination against the
    /// move calculator first. Turn advancement is a separate step, see [`Board::end_turn`].
    pub fn apply_move(&mut self, from: Square, to: Square) -> ChessResult<Option<Piece>> {
        if let Some(sq) = self.pending_promotion {
            return Err(ChessError::PromotionPending(sq));
        }
        self.make_move(from, to)
    }

    /// Moves the piece on `from` to `to` and pushes an undo record.
    ///
    /// Resolves en-passant captures, castling rook relocation, castling-right revocation and flags promotions as
    /// pending. Every check runs before the first mutation.
    pub fn make_move(&mut self, from: Square, to: Square) -> ChessResult<Option<Piece>> {
        let moved = self.mailbox[from].ok_or(ChessError::EmptySquare(from))?;
        let piece = self.piece_by_id(moved)?;
        let color = piece.color;

        // Capture target, read before any en-passant state is rewritten
        let victim_square = match self.occupant(to) {
            Some(target) if !target.is_hostile(&piece) => return Err(ChessError::OccupiedSquare(to)),
            Some(_) => Some(to),
            None if piece.kind == PieceType::Pawn && self.en_passant == Some(to) && from.file() != to.file() => {
                let passed = Square::new(from.rank() * 8 + to.file());
                self.occupant(passed)
                    .filter(|p| p.kind == PieceType::Pawn && p.is_hostile(&piece))
                    .map(|_| passed)
            }
            None => None,
        };
        let victim = match victim_square {
            Some(sq) => {
                let id = self.mailbox[sq].ok_or(ChessError::EmptySquare(sq))?;
                let victim = self.piece_by_id(id)?;
                if victim.kind == PieceType::King {
                    return Err(ChessError::KingRemoval(victim.color));
                }
                Some((id, victim))
            }
            None => None,
        };

        let castle_side = if piece.kind == PieceType::King && from == king_origin(color) && from.rank() == to.rank() {
            let side = match to.file() as i8 - from.file() as i8 {
                2 => Some(CastleSide::KingSide),
                -2 => Some(CastleSide::QueenSide),
                _ => None,
            };
            side.filter(|&side| self.castling.has(color, side))
        } else {
            None
        };
        let rook_move = match castle_side {
            Some(side) => {
                let (rook_from, rook_to) = (side.rook_origin(color), side.rook_target(color));
                let rook = self.mailbox[rook_from]
                    .filter(|&id| {
                        self.pool[id as usize].is_some_and(|p| p.kind == PieceType::Rook && p.color == color)
                    })
                    .ok_or(ChessError::InconsistentState("castling right without its rook"))?;
                if self.mailbox[rook_to].is_some() {
                    return Err(ChessError::OccupiedSquare(rook_to));
                }
                Some((rook, rook_from, rook_to))
            }
            None => None,
        };

        let mut state = State {
            from,
            to,
            moved,
            captured: None,
            rook_move: None,
            promoted: false,
            castling: self.castling,
            en_passant: self.en_passant,
            pending_promotion: self.pending_promotion,
        };

        if let Some((id, victim)) = victim {
            state.captured = Some(self.unlink(id, victim)?);
            if victim.kind == PieceType::Rook {
                if let Some(side) = CastleSide::from_rook_origin(victim.square(), victim.color) {
                    self.castling.revoke(victim.color, side);
                }
            }
        }
        if let Some((rook, rook_from, rook_to)) = rook_move {
            self.relocate(rook, rook_from, rook_to);
            state.rook_move = Some((rook_from, rook_to));
        }
        self.relocate(moved, from, to);

        match piece.kind {
            PieceType::King => self.castling.revoke_all(color),
            PieceType::Rook => {
                if let Some(side) = CastleSide::from_rook_origin(from, color) {
                    self.castling.revoke(color, side);
                }
            }
            _ => {}
        }

        let is_pawn = piece.kind == PieceType::Pawn;
        self.en_passant = if is_pawn && from.rank() == color.pawn_rank() && from.rank().abs_diff(to.rank()) == 2 {
            Some(Square::new((from.rank() + to.rank()) / 2 * 8 + from.file()))
        } else {
            None
        };
        if is_pawn && to.rank() == color.promotion_rank() {
            self.pending_promotion = Some(to);
        }

        self.state_stack.push(state);
        Ok(victim.map(|(_, p)| p))
    }

    /// Reverts the last move made with [`Board::make_move`], including a promotion applied on top of it.
    pub fn unmake_move(&mut self) -> ChessResult<()> {
        let state = self.state_stack.pop().ok_or(ChessError::InconsistentState("no move to unmake"))?;

        if state.promoted {
            if let Some(piece) = self.pool[state.moved as usize].as_mut() {
                piece.kind = PieceType::Pawn;
            }
        }
        self.relocate(state.moved, state.to, state.from);
        if let Some((rook_from, rook_to)) = state.rook_move {
            let rook = self.mailbox[rook_to].ok_or(ChessError::InconsistentState("castled rook vanished"))?;
            self.relocate(rook, rook_to, rook_from);
        }
        if let Some(capture) = state.captured {
            self.relink(capture)?;
        }

        self.castling = state.castling;
        self.en_passant = state.en_passant;
        self.pending_promotion = state.pending_promotion;
        Ok(())
    }

    /// Turns the pawn waiting on the back rank into `kind`.
    pub fn promote(&mut self, kind: PieceType) -> ChessResult<()> {
        let sq = self.pending_promotion.ok_or(ChessError::NoPendingPromotion)?;
        if !PieceType::PROMOTIONS.contains(&kind) {
            return Err(ChessError::InvalidPromotion(kind));
        }
        let id = self.mailbox[sq].ok_or(ChessError::EmptySquare(sq))?;
        let piece = self.pool[id as usize]
            .as_mut()
            .ok_or(ChessError::InconsistentState("piece id without pool entry"))?;
        piece.kind = kind;
        self.pending_promotion = None;
        if let Some(state) = self.state_stack.last_mut() {
            state.promoted = true;
        }
        Ok(())
    }

    /// Commits the current turn: the other color moves next and the undo log is cleared.
    pub fn end_turn(&mut self) -> ChessResult<()> {
        if let Some(sq) = self.pending_promotion {
            return Err(ChessError::PromotionPending(sq));
        }
        self.side_to_move = !self.side_to_move;
        self.turn += 1;
        self.state_stack.clear();
        Ok(())
    }
}

/// Whether two kings on these squares would touch.
pub fn kings_too_close(a: Square, b: Square) -> bool {
    a.file().abs_diff(b.file()) < 2 && a.rank().abs_diff(b.rank()) < 2
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Boards compare by position: the same pieces on the same squares in the same roster order, the same rights,
/// en-passant target, pending promotion, side to move and turn. Undo logs are ignored.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        Square::ALL.iter().all(|&sq| self.occupant(sq) == other.occupant(sq))
            && Color::ALL.iter().all(|&c| self.pieces(c).eq(other.pieces(c)))
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.pending_promotion == other.pending_promotion
            && self.side_to_move == other.side_to_move
            && self.turn == other.turn
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +------------------------+")?;
        for rank in (0..8).rev() {
            write!(f, "{} |", rank + 1)?;
            for file in 0..8 {
                let ch = self.occupant(Square::new(rank * 8 + file)).map_or('.', |p| p.to_char());
                write!(f, " {ch} ")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +------------------------+")?;
        writeln!(f, "    a  b  c  d  e  f  g  h")?;
        write!(f, "{:?} to move", self.side_to_move)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        write!(f, "castling {:?}, en passant {:?}, turn {}", self.castling, self.en_passant, self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(board: &Board) {
        for color in Color::ALL {
            for piece in board.pieces(color) {
                assert_eq!(board.occupant(piece.square()), Some(piece));
            }
        }
        let on_grid = Square::ALL.iter().filter(|&&sq| board.has_piece(sq)).count();
        assert_eq!(on_grid, board.piece_count(Color::White) + board.piece_count(Color::Black));
    }

    fn kings() -> Board {
        let mut board = Board::empty();
        board.place_piece(PieceType::King, Color::White, Square::E1).unwrap();
        board.place_piece(PieceType::King, Color::Black, Square::E8).unwrap();
        board
    }

    #[test]
    fn startpos_layout() {
        let board = Board::startpos();
        assert_eq!(board.piece_count(Color::White), 16);
        assert_eq!(board.piece_count(Color::Black), 16);
        assert_eq!(board.king_square(Color::White), Ok(Square::E1));
        assert_eq!(board.king_square(Color::Black), Ok(Square::E8));
        assert_eq!(board.piece_at(Square::D8).map(|p| p.kind), Ok(PieceType::Queen));
        assert_eq!(board.castling_rights(), CastlingRights::ALL);
        assert_consistent(&board);
    }

    #[test]
    fn occupancy_errors() {
        let mut board = kings();
        assert_eq!(board.piece_at(Square::E4), Err(ChessError::EmptySquare(Square::E4)));
        assert_eq!(board.remove_piece(Square::E4), Err(ChessError::EmptySquare(Square::E4)));
        assert_eq!(
            board.place_piece(PieceType::Rook, Color::White, Square::E1),
            Err(ChessError::OccupiedSquare(Square::E1))
        );
        assert_eq!(board.remove_piece(Square::E8), Err(ChessError::KingRemoval(Color::Black)));
        assert!(matches!(
            board.place_piece(PieceType::King, Color::White, Square::A1),
            Err(ChessError::InconsistentState(_))
        ));
        assert!(matches!(Board::empty().king(Color::White), Err(ChessError::InconsistentState(_))));
    }

    #[test]
    fn capture_removes_from_registry_and_unmake_restores_order() {
        let mut board = kings();
        board.place_piece(PieceType::Rook, Color::White, Square::A1).unwrap();
        board.place_piece(PieceType::Knight, Color::Black, Square::A5).unwrap();
        board.place_piece(PieceType::Pawn, Color::Black, Square::H7).unwrap();
        let before = board.clone();

        let captured = board.make_move(Square::A1, Square::A5).unwrap();
        assert_eq!(captured.map(|p| (p.kind, p.square())), Some((PieceType::Knight, Square::A5)));
        assert_eq!(board.piece_count(Color::Black), 2);
        assert_consistent(&board);

        board.unmake_move().unwrap();
        assert_eq!(board, before);
        assert_consistent(&board);
    }

    #[test]
    fn friendly_destination_is_rejected_without_mutation() {
        let mut board = Board::startpos();
        let before = board.clone();
        assert_eq!(board.make_move(Square::A1, Square::A2), Err(ChessError::OccupiedSquare(Square::A2)));
        assert_eq!(board.make_move(Square::A4, Square::A5), Err(ChessError::EmptySquare(Square::A4)));
        assert_eq!(board, before);
        assert_eq!(board.undo_depth(), 0);
    }

    #[test]
    fn double_step_sets_target_for_one_move() {
        let mut board = Board::startpos();
        board.make_move(Square::E2, Square::E4).unwrap();
        assert_eq!(board.en_passant_square(), Some(Square::E3));
        board.make_move(Square::G8, Square::F6).unwrap();
        assert_eq!(board.en_passant_square(), None);
        board.unmake_move().unwrap();
        assert_eq!(board.en_passant_square(), Some(Square::E3));
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let mut board = kings();
        board.place_piece(PieceType::Pawn, Color::White, Square::E5).unwrap();
        board.place_piece(PieceType::Pawn, Color::Black, Square::D7).unwrap();
        board.make_move(Square::D7, Square::D5).unwrap();
        let before = board.clone();

        let captured = board.make_move(Square::E5, Square::D6).unwrap();
        assert_eq!(captured.map(|p| p.square()), Some(Square::D5));
        assert!(!board.has_piece(Square::D5));
        assert_eq!(board.piece_count(Color::Black), 1);
        assert_eq!(board.en_passant_square(), None);

        board.unmake_move().unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn castling_moves_rook_and_revokes_rights() {
        let mut board = kings();
        board.place_piece(PieceType::Rook, Color::White, Square::H1).unwrap();
        board.place_piece(PieceType::Rook, Color::White, Square::A1).unwrap();
        board.grant_castling(Color::White, CastleSide::KingSide);
        board.grant_castling(Color::White, CastleSide::QueenSide);
        let before = board.clone();

        board.make_move(Square::E1, Square::G1).unwrap();
        assert_eq!(board.piece_at(Square::F1).map(|p| p.kind), Ok(PieceType::Rook));
        assert_eq!(board.piece_at(Square::G1).map(|p| p.kind), Ok(PieceType::King));
        assert!(!board.has_piece(Square::H1));
        assert!(!board.can_castle(Color::White, CastleSide::KingSide));
        assert!(!board.can_castle(Color::White, CastleSide::QueenSide));

        board.unmake_move().unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn rook_move_revokes_its_side_only() {
        let mut board = Board::startpos();
        board.make_move(Square::H2, Square::H4).unwrap();
        board.make_move(Square::H1, Square::H3).unwrap();
        assert!(!board.can_castle(Color::White, CastleSide::KingSide));
        assert!(board.can_castle(Color::White, CastleSide::QueenSide));
        board.make_move(Square::H3, Square::H1).unwrap();
        assert!(!board.can_castle(Color::White, CastleSide::KingSide));
    }

    #[test]
    fn capturing_a_corner_rook_revokes_the_owners_right() {
        let mut board = kings();
        board.place_piece(PieceType::Bishop, Color::White, Square::C3).unwrap();
        board.place_piece(PieceType::Rook, Color::Black, Square::H8).unwrap();
        board.place_piece(PieceType::Rook, Color::Black, Square::A8).unwrap();
        board.grant_castling(Color::Black, CastleSide::KingSide);
        board.grant_castling(Color::Black, CastleSide::QueenSide);
        let before = board.clone();

        let captured = board.make_move(Square::C3, Square::H8).unwrap();
        assert_eq!(captured.map(|p| p.kind), Some(PieceType::Rook));
        assert!(!board.can_castle(Color::Black, CastleSide::KingSide));
        assert!(board.can_castle(Color::Black, CastleSide::QueenSide));

        board.unmake_move().unwrap();
        assert!(board.can_castle(Color::Black, CastleSide::KingSide));
        assert_eq!(board, before);
    }

    #[test]
    fn promotion_is_pending_until_resolved() {
        let mut board = kings();
        board.place_piece(PieceType::Pawn, Color::White, Square::A7).unwrap();
        let before = board.clone();

        board.apply_move(Square::A7, Square::A8).unwrap();
        assert_eq!(board.pending_promotion(), Some(Square::A8));
        assert_eq!(board.piece_at(Square::A8).map(|p| p.kind), Ok(PieceType::Pawn));
        assert_eq!(board.end_turn(), Err(ChessError::PromotionPending(Square::A8)));
        assert_eq!(board.apply_move(Square::E1, Square::D1), Err(ChessError::PromotionPending(Square::A8)));
        assert_eq!(board.promote(PieceType::King), Err(ChessError::InvalidPromotion(PieceType::King)));

        board.promote(PieceType::Knight).unwrap();
        assert_eq!(board.piece_at(Square::A8).map(|p| p.kind), Ok(PieceType::Knight));
        assert_eq!(board.promote(PieceType::Queen), Err(ChessError::NoPendingPromotion));

        board.unmake_move().unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn end_turn_advances_and_clears_undo_log() {
        let mut board = Board::startpos();
        board.apply_move(Square::E2, Square::E4).unwrap();
        board.end_turn().unwrap();
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.turn(), 1);
        assert!(matches!(board.unmake_move(), Err(ChessError::InconsistentState(_))));
    }

    #[test]
    fn clone_is_independent() {
        let original = Board::startpos();
        let mut copy = original.clone_board();
        copy.make_move(Square::B1, Square::C3).unwrap();
        copy.remove_piece(Square::A7).unwrap();
        assert!(original.has_piece(Square::B1));
        assert!(original.has_piece(Square::A7));
        assert_eq!(original.piece_count(Color::Black), 16);
        assert_ne!(original, copy);
    }

    #[test]
    fn adjacent_kings() {
        assert!(kings_too_close(Square::E4, Square::F5));
        assert!(!kings_too_close(Square::E4, Square::G5));
    }
}
