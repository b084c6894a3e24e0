//! Attack table generation and attack probing.
//!
//! This module generates step look-up tables for knights, kings and pawns.
//! Tables provide the squares reachable by a piece type from a given square, queried via `[square]` or
//! `[color][square]`.
//!
//! Sliding pieces are handled by walking rays over the board because their reach depends on occupancy.

use std::sync::OnceLock;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::types::{Color, PieceType, Square};

/// Contains the step look-up tables per piece.
pub struct AttackTables {
    pub knight: [Bitboard; 64],
    pub king: [Bitboard; 64],
    pub pawn_capture: [[Bitboard; 64]; 2],
    pub pawn_push: [[Bitboard; 64]; 2],
    pub pawn_double_push: [[Bitboard; 64]; 2],
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [(2, 1), (2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2), (-2, 1), (-2, -1)];
const KING_DELTAS: [(i8, i8); 8] = [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];

/// Orthogonal ray directions as (file, rank) deltas.
pub const ROOK_DELTAS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
/// Diagonal ray directions as (file, rank) deltas.
pub const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Global attack tables, initialized on first use.
static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

/// Returns the attack tables, computing them on the first call.
pub fn tables() -> &'static AttackTables {
    ATTACK_TABLES.get_or_init(AttackTables::new)
}

impl AttackTables {
    fn new() -> Self {
        let mut knight = [Bitboard(0); 64];
        let mut king = [Bitboard(0); 64];
        let mut pawn_capture = [[Bitboard(0); 64]; 2]; //Color-dependent
        let mut pawn_push = [[Bitboard(0); 64]; 2]; //Color-dependent
        let mut pawn_double_push = [[Bitboard(0); 64]; 2]; //Color-dependent

        for sq in Square::ALL {
            // ****************** KNIGHT ******************
            for (delta_rank, delta_file) in KNIGHT_DELTAS {
                if let Some(to) = sq.offset(delta_file, delta_rank) {
                    knight[sq] |= to.bb();
                }
            }

            // ****************** KING ******************
            for (delta_rank, delta_file) in KING_DELTAS {
                if let Some(to) = sq.offset(delta_file, delta_rank) {
                    king[sq] |= to.bb();
                }
            }

            for color in Color::ALL {
                let forward = color.forward();

                // ****************** PAWN CAPTURE ******************
                for delta_file in [-1, 1] {
                    if let Some(to) = sq.offset(delta_file, forward) {
                        pawn_capture[color][sq] |= to.bb();
                    }
                }

                // ****************** PAWN PUSH ******************
                if let Some(to) = sq.offset(0, forward) {
                    pawn_push[color][sq] = to.bb();
                }

                // ****************** DOUBLE PAWN PUSH ******************
                if sq.rank() == color.pawn_rank() {
                    if let Some(to) = sq.offset(0, 2 * forward) {
                        pawn_double_push[color][sq] = to.bb();
                    }
                }
            }
        }

        Self { knight, king, pawn_capture, pawn_push, pawn_double_push }
    }
}

/// Walks from `from` along `delta` and returns the first occupied square, if any.
#[inline(always)]
pub fn first_occupied(board: &Board, from: Square, (delta_file, delta_rank): (i8, i8)) -> Option<Square> {
    let mut current = from;
    while let Some(next) = current.offset(delta_file, delta_rank) {
        if board.occupant(next).is_some() {
            return Some(next);
        }
        current = next;
    }
    None
}

/// Checks whether any piece of color `by` attacks `sq`.
///
/// Rays are scanned outward from `sq` for the first occupant: rook or queen on the orthogonals, bishop or queen on
/// the diagonals. Pawns, knights and the king are single-step lookups.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    const ORTHOGONAL: &[PieceType] = &[PieceType::Rook, PieceType::Queen];
    const DIAGONAL: &[PieceType] = &[PieceType::Bishop, PieceType::Queen];

    let holds = |target: Square, kinds: &[PieceType]| {
        board.occupant(target).is_some_and(|p| p.color == by && kinds.contains(&p.kind))
    };

    if ROOK_DELTAS.into_iter().any(|delta| first_occupied(board, sq, delta).is_some_and(|s| holds(s, ORTHOGONAL))) {
        return true;
    }
    if BISHOP_DELTAS.into_iter().any(|delta| first_occupied(board, sq, delta).is_some_and(|s| holds(s, DIAGONAL))) {
        return true;
    }

    let t = tables();
    // A pawn of `by` attacks `sq` from the squares a pawn of the other color on `sq` would capture on.
    t.knight[sq].squares().any(|s| holds(s, &[PieceType::Knight][..]))
        || t.pawn_capture[!by][sq].squares().any(|s| holds(s, &[PieceType::Pawn][..]))
        || t.king[sq].squares().any(|s| holds(s, &[PieceType::King][..]))
}
