//! Legal move generation.
//!
//! Each figure has its own pseudo-legal generator, dispatched by an exhaustive match on the piece type. A candidate
//! becomes legal only if making it on the board leaves the mover's king unattacked; the probe is always followed by
//! an unmake, so the board comes back exactly as it was.

use crate::attack::{BISHOP_DELTAS, ROOK_DELTAS, is_square_attacked, tables};
use crate::bitboard::Bitboard;
use crate::board::{Board, kings_too_close};
use crate::error::ChessResult;
use crate::moves::Move;
use crate::types::{CastleSide, Color, Piece, PieceType, Square, king_origin};

/// Includes the list of moves generated for each position. It was found that certain position
/// can reach up to ~200 legal moves, hence the rounding to 256.
pub struct MoveList {
    moves: [Move; 256],
    count: usize,
}

impl MoveList {
    pub fn new() -> Self {
        Self { moves: [Move::NULL_MOVE; 256], count: 0 }
    }

    pub fn push(&mut self, m: Move) {
        self.moves[self.count] = m;
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves[..self.count].iter()
    }

    pub fn contains(&self, m: Move) -> bool {
        self.iter().any(|&x| x == m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

/// Legal destinations of the piece standing on `from`.
///
/// Fails with `EmptySquare` if there is no piece there.
pub fn possible_moves(board: &mut Board, from: Square) -> ChessResult<Bitboard> {
    let piece = *board.piece_at(from)?;
    let mut legal = Bitboard::EMPTY;
    for to in pseudo_legal(board, &piece)?.squares() {
        if !leaves_king_attacked(board, from, to, piece.color)? {
            legal |= to.bb();
        }
    }
    Ok(legal)
}

/// Legal destinations of `piece`, looked up by its square.
pub fn piece_moves(board: &mut Board, piece: &Piece) -> ChessResult<Bitboard> {
    possible_moves(board, piece.square())
}

/// Appends every legal move of `color` to `list`, piece by piece in roster order.
pub fn generate_all_moves(board: &mut Board, color: Color, list: &mut MoveList) -> ChessResult<()> {
    // Simulation unmakes every probe, so roster indices are stable across the loop
    for index in 0..board.piece_count(color) {
        let Some(from) = board.nth_piece(color, index).map(Piece::square) else {
            continue;
        };
        for to in possible_moves(board, from)?.squares() {
            list.push(Move::new(from, to));
        }
    }
    Ok(())
}

/// Whether `color` has at least one legal move.
pub fn has_legal_move(board: &mut Board, color: Color) -> ChessResult<bool> {
    for index in 0..board.piece_count(color) {
        let Some(from) = board.nth_piece(color, index).map(Piece::square) else {
            continue;
        };
        if !possible_moves(board, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Whether the king of `color` is attacked, regardless of whose turn it is.
pub fn is_in_check(board: &Board, color: Color) -> ChessResult<bool> {
    Ok(is_square_attacked(board, board.king_square(color)?, !color))
}

/// In check with no legal move.
pub fn is_checkmate(board: &mut Board, color: Color) -> ChessResult<bool> {
    Ok(is_in_check(board, color)? && !has_legal_move(board, color)?)
}

/// No legal move without being in check: a draw.
pub fn is_stalemate(board: &mut Board, color: Color) -> ChessResult<bool> {
    Ok(!is_in_check(board, color)? && !has_legal_move(board, color)?)
}

/// Makes the move, probes the mover's king and unmakes, whatever the probe said.
fn leaves_king_attacked(board: &mut Board, from: Square, to: Square, color: Color) -> ChessResult<bool> {
    board.make_move(from, to)?;
    let verdict = match board.king_square(color) {
        Ok(sq) => Ok(is_square_attacked(board, sq, !color)),
        Err(e) => Err(e),
    };
    board.unmake_move()?;
    verdict
}

/// Candidate destinations before the king-safety probe. The enemy king is never a target: it cannot be captured.
fn pseudo_legal(board: &Board, piece: &Piece) -> ChessResult<Bitboard> {
    let enemy_king = board.king_square(!piece.color)?;
    let targets = match piece.kind {
        PieceType::Pawn => pawn_moves(board, piece),
        PieceType::Knight => step_moves(board, piece, tables().knight[piece.square()]),
        PieceType::Bishop => sliding_moves(board, piece, &BISHOP_DELTAS),
        PieceType::Rook => sliding_moves(board, piece, &ROOK_DELTAS),
        PieceType::Queen => sliding_moves(board, piece, &ROOK_DELTAS) | sliding_moves(board, piece, &BISHOP_DELTAS),
        PieceType::King => king_moves(board, piece, enemy_king),
    };
    Ok(targets & !enemy_king.bb())
}

fn pawn_moves(board: &Board, pawn: &Piece) -> Bitboard {
    let t = tables();
    let from = pawn.square();
    let mut targets = Bitboard::EMPTY;

    let single = t.pawn_push[pawn.color][from];
    if single.squares().all(|sq| !board.has_piece(sq)) {
        targets |= single;
        // The table is only filled on the home rank, and the intervening square was just checked
        let double = t.pawn_double_push[pawn.color][from];
        if double.squares().all(|sq| !board.has_piece(sq)) {
            targets |= double;
        }
    }

    for to in t.pawn_capture[pawn.color][from].squares() {
        let capturable = match board.occupant(to) {
            Some(target) => target.is_hostile(pawn),
            None => board.en_passant_square() == Some(to) && en_passant_victim(board, pawn, to),
        };
        if capturable {
            targets |= to.bb();
        }
    }
    targets
}

/// The pawn passed over `target` must be an enemy pawn beside the capturer.
fn en_passant_victim(board: &Board, pawn: &Piece, target: Square) -> bool {
    let passed = Square::new(pawn.square().rank() * 8 + target.file());
    board.occupant(passed).is_some_and(|p| p.kind == PieceType::Pawn && p.is_hostile(pawn))
}

fn step_moves(board: &Board, piece: &Piece, steps: Bitboard) -> Bitboard {
    steps
        .squares()
        .filter(|&sq| board.occupant(sq).is_none_or(|p| p.is_hostile(piece)))
        .collect()
}

fn sliding_moves(board: &Board, piece: &Piece, deltas: &[(i8, i8)]) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    for &(delta_file, delta_rank) in deltas {
        let mut current = piece.square();
        while let Some(next) = current.offset(delta_file, delta_rank) {
            match board.occupant(next) {
                Some(occupant) => {
                    if occupant.is_hostile(piece) {
                        targets |= next.bb();
                    }
                    break; // Path is blocked
                }
                None => targets |= next.bb(),
            }
            current = next;
        }
    }
    targets
}

fn king_moves(board: &Board, king: &Piece, enemy_king: Square) -> Bitboard {
    let mut targets = step_moves(board, king, tables().king[king.square()]);
    targets = targets.squares().filter(|&sq| !kings_too_close(sq, enemy_king)).collect();
    targets | castling_moves(board, king)
}

/// Castling destinations: the king and the rook on their home squares, every square between them empty, and the
/// king neither in check nor crossing an attacked square. Attacks on the destination are left to the simulation.
fn castling_moves(board: &Board, king: &Piece) -> Bitboard {
    let color = king.color;
    if king.square() != king_origin(color) || is_square_attacked(board, king.square(), !color) {
        return Bitboard::EMPTY;
    }

    let mut targets = Bitboard::EMPTY;
    for side in CastleSide::ALL {
        if !board.can_castle(color, side) {
            continue;
        }
        let rook_origin = side.rook_origin(color);
        let has_rook = board.occupant(rook_origin).is_some_and(|p| p.kind == PieceType::Rook && p.color == color);
        if !has_rook {
            continue;
        }

        let (low, high) = if rook_origin.file() < king.square().file() {
            (rook_origin.file() + 1, king.square().file())
        } else {
            (king.square().file() + 1, rook_origin.file())
        };
        let rank = color.home_rank();
        let path_clear = (low..high).all(|file| !board.has_piece(Square::new(rank * 8 + file)));
        let crossed = side.rook_target(color);
        if path_clear && !is_square_attacked(board, crossed, !color) {
            targets |= side.king_target(color).bb();
        }
    }
    targets
}
