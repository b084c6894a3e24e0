//! Low-level move encoding.
//!
//! A move is an origin and a destination square packed in 16 bits. Castling, en passant and promotion are
//! resolved by the board when the move is applied, so they need no flags here.

use std::fmt;
use std::str::FromStr;

use crate::error::ChessError;
use crate::types::Square;

/// 16-bit encoded move.
/// 0-5: from square (0 to 63)
/// 6-11: to square (0 to 63)
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    encoding: u16,
}

impl Move {
    /// Placeholder used to fill move lists.
    pub const NULL_MOVE: Move = Move { encoding: 0 };

    pub const fn new(from: Square, to: Square) -> Self {
        Self { encoding: (from as u16) | ((to as u16) << 6) }
    }

    /// Returns the origin square.
    #[inline(always)]
    pub const fn from(self) -> Square {
        Square::new((self.encoding & 0x3F) as u8)
    }

    /// Returns the destination square.
    #[inline(always)]
    pub const fn to(self) -> Square {
        Square::new(((self.encoding >> 6) & 0x3F) as u8)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from(), self.to())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Parses "e2e4", "E2E4" or "e2-e4".
impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.trim().chars().filter(|&c| c != '-').collect();
        if compact.len() != 4 || !compact.is_ascii() {
            return Err(ChessError::InvalidCoordinate(s.to_string()));
        }
        let (from, to) = compact.split_at(2);
        Ok(Move::new(from.parse()?, to.parse()?))
    }
}
