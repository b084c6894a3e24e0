//! Error types for the rules engine.
//!
//! Every mutating call validates its input before touching the board, so an `Err` always leaves the position as it
//! was. Retrying or prompting is left to the caller.

use crate::types::{Color, PieceType, Square};

/// Typed failures surfaced by the board, the move calculator and the search.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Coordinate outside 0..=7 on either axis, or unparsable text.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Read, move or removal from a square with no piece.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// Placement onto a square whose occupant was not removed first.
    #[error("square {0} is already occupied")]
    OccupiedSquare(Square),

    /// Destination is not in the legal set of the piece.
    #[error("illegal move {from}-{to}")]
    IllegalMove { from: Square, to: Square },

    /// The piece on the square does not belong to the side to move.
    #[error("piece on {0} does not belong to the side to move")]
    NotYourTurn(Square),

    /// Kings stay on the board for the whole game.
    #[error("the {0:?} king cannot be removed")]
    KingRemoval(Color),

    /// A pawn on the given square is waiting for its promotion figure.
    #[error("pawn on {0} must be promoted first")]
    PromotionPending(Square),

    #[error("no pawn is waiting for promotion")]
    NoPendingPromotion,

    /// Pawns promote to queen, rook, bishop or knight only.
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceType),

    #[error("search depth must be at least one ply, got {0}")]
    InvalidDepth(u8),

    /// A board invariant was broken earlier (missing king, empty undo log, exhausted piece pool).
    #[error("inconsistent board state: {0}")]
    InconsistentState(&'static str),
}

/// Result type for engine operations.
pub type ChessResult<T> = Result<T, ChessError>;
