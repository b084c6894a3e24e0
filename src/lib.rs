//! Chess rules engine and fixed-depth minimax search.
//!
//! The [`board::Board`] holds the position and applies moves, [`movegen`] produces legal destinations and answers
//! check, checkmate and stalemate questions, [`search`] picks a move by material minimax, and [`game::Game`] ties
//! the board to a [`history::BoardHistory`] for play with undo.

pub mod attack;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod history;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod search;
pub mod types;

pub use bitboard::Bitboard;
pub use board::Board;
pub use error::{ChessError, ChessResult};
pub use game::{Game, GameStatus};
pub use history::BoardHistory;
pub use movegen::{is_checkmate, is_in_check, is_stalemate, piece_moves, possible_moves};
pub use moves::Move;
pub use search::{DEFAULT_DEPTH, Search, SearchResult, best_move};
pub use types::{CastleSide, Color, Piece, PieceType, Square};
