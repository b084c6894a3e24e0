use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::types::Square;

/// Set of squares packed into 64 bits, bit `n` standing for `Square::new(n)`.
///
/// Destination sets returned by the move calculator are bitboards; iterate them with [`Bitboard::squares`].
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    #[inline(always)]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq as u8) != 0
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn popcnt(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the squares of the set from A1 towards H8.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(Square::new(idx))
        })
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::EMPTY, |acc, sq| acc | sq.bb())
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.squares()).finish()
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_in_square_order() {
        let set: Bitboard = [Square::H8, Square::A1, Square::E4].into_iter().collect();
        assert_eq!(set.popcnt(), 3);
        assert_eq!(set.squares().collect::<Vec<_>>(), vec![Square::A1, Square::E4, Square::H8]);
        assert!(set.contains(Square::E4));
        assert!(!set.contains(Square::E5));
        assert_eq!(set & !Square::E4.bb(), Square::A1.bb() | Square::H8.bb());
    }
}
