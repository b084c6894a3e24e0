use std::fmt;
use std::ops::{Index, IndexMut, Not};
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::error::{ChessError, ChessResult};

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Rank index of the back rank (0 for White, 7 for Black).
    #[inline(always)]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank index the pawns start on.
    #[inline(always)]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank index a pawn of this color promotes on.
    #[inline(always)]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// +1 if pawns of this color move up the board, -1 otherwise.
    #[inline(always)]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// Allows for array indexing without explicit conversion of Color to usize.
/// Example: `array[Color::White]`
impl<T> Index<Color> for [T] {
    type Output = T;
    fn index(&self, index: Color) -> &Self::Output {
        &self[index as usize]
    }
}

impl<T> IndexMut<Color> for [T] {
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index as usize]
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

const FILE_LETTERS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

impl Square {
    #[rustfmt::skip]
    pub const ALL: [Square; 64] = [
        Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
        Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
        Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
        Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
        Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
        Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
        Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
        Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
    ];

    pub const fn new(index: u8) -> Self {
        debug_assert!(index < 64);
        Square::ALL[(index & 63) as usize]
    }

    /// Builds a square from zero-based file and rank, rank 0 being rank 1.
    pub fn from_coords(file: u8, rank: u8) -> ChessResult<Self> {
        if file > 7 || rank > 7 {
            return Err(ChessError::InvalidCoordinate(format!("({file}, {rank})")));
        }
        Ok(Square::new(rank * 8 + file))
    }

    /// Returns the rank index of the square
    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self as u8 >> 3 // Same as /8
    }

    /// Returns the file index of the square
    #[inline(always)]
    pub const fn file(self) -> u8 {
        self as u8 & 0b0000_0111 // Same as %8
    }

    /// Steps by a file/rank delta, `None` when that leaves the board.
    #[inline(always)]
    pub const fn offset(self, delta_file: i8, delta_rank: i8) -> Option<Square> {
        let to_file = self.file() as i8 + delta_file;
        let to_rank = self.rank() as i8 + delta_rank;
        if to_file < 0 || to_file > 7 || to_rank < 0 || to_rank > 7 {
            return None;
        }
        Some(Square::new((to_rank * 8 + to_file) as u8))
    }

    /// Turns the square into a bitboard
    #[inline(always)]
    pub fn bb(self) -> Bitboard {
        Bitboard(1u64 << (self as u8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FILE_LETTERS[self.file() as usize], self.rank() + 1)
    }
}

/// Parses "E2" or "e2".
impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidCoordinate(s.to_string());
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_uppercase().wrapping_sub(b'A');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(invalid());
        }
        Square::from_coords(file, rank)
    }
}

/// Allows for array indexing without explicit conversion of Square to usize.
/// Example: `mailbox[Square::E4]`
impl<T> Index<Square> for [T] {
    type Output = T;
    fn index(&self, index: Square) -> &Self::Output {
        &self[index as usize]
    }
}

impl<T> IndexMut<Square> for [T] {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index as usize]
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PieceType {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Figures a pawn may turn into.
    pub const PROMOTIONS: [PieceType; 4] = [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

    /// Upper-case letter of the figure.
    #[rustfmt::skip]
    pub const fn to_char(self) -> char {
        match self {
            PieceType::Pawn   => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook   => 'R',
            PieceType::Queen  => 'Q',
            PieceType::King   => 'K',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Corner the rook starts from.
    pub const fn rook_origin(self, color: Color) -> Square {
        let file = match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        };
        Square::new(color.home_rank() * 8 + file)
    }

    /// Square the rook lands on after castling.
    pub const fn rook_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        };
        Square::new(color.home_rank() * 8 + file)
    }

    /// Square the king lands on after castling.
    pub const fn king_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        };
        Square::new(color.home_rank() * 8 + file)
    }

    /// Side whose rook starts on `square`, if it is a castling corner of `color`.
    pub fn from_rook_origin(square: Square, color: Color) -> Option<Self> {
        CastleSide::ALL.into_iter().find(|side| side.rook_origin(color) == square)
    }
}

/// Square the king of `color` starts on.
#[inline(always)]
pub const fn king_origin(color: Color) -> Square {
    Square::new(color.home_rank() * 8 + 4)
}

/// A live piece: figure, color and the square it stands on.
///
/// Pieces only come into existence by being placed on a board, so the position is always defined.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
    square: Square,
}

impl Piece {
    pub(crate) const fn new(kind: PieceType, color: Color, square: Square) -> Self {
        Self { kind, color, square }
    }

    #[inline(always)]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline(always)]
    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square;
    }

    #[inline(always)]
    pub fn is_hostile(&self, other: &Piece) -> bool {
        self.color != other.color
    }

    /// Converts Piece to a character, upper-case for White.
    pub const fn to_char(self) -> char {
        let ch = self.kind.to_char();
        match self.color {
            Color::White => ch,
            Color::Black => ch.to_ascii_lowercase(),
        }
    }
}
