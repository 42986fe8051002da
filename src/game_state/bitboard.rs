//! 64-bit square-set primitives.
//!
//! Bitboards stay plain `u64` values so masks compose with ordinary bit
//! operators; these helpers name the handful of idioms used everywhere else.

use crate::game_state::chess_types::Square;

pub type Bitboard = u64;

pub const EMPTY: Bitboard = 0;
pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_H: Bitboard = FILE_A << 7;
pub const RANK_1: Bitboard = 0xFF;
pub const RANK_8: Bitboard = RANK_1 << 56;

#[inline]
pub const fn square_mask(square: Square) -> Bitboard {
    1u64 << square
}

#[inline]
pub const fn set_square(bitboard: Bitboard, square: Square) -> Bitboard {
    bitboard | square_mask(square)
}

#[inline]
pub const fn clear_square(bitboard: Bitboard, square: Square) -> Bitboard {
    bitboard & !square_mask(square)
}

#[inline]
pub const fn test_square(bitboard: Bitboard, square: Square) -> bool {
    bitboard & square_mask(square) != 0
}

#[inline]
pub const fn file_mask(file: u8) -> Bitboard {
    FILE_A << file
}

/// Remove and return the least significant square.
#[inline]
pub fn pop_lsb(bitboard: &mut Bitboard) -> Option<Square> {
    if *bitboard == 0 {
        return None;
    }
    let square = bitboard.trailing_zeros() as Square;
    *bitboard &= *bitboard - 1;
    Some(square)
}

/// Iterate the set squares of a bitboard in ascending order.
#[inline]
pub fn squares(bitboard: Bitboard) -> BitboardIter {
    BitboardIter(bitboard)
}

#[derive(Debug, Clone, Copy)]
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        pop_lsb(&mut self.0)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clear_and_test_square() {
        let bb = set_square(EMPTY, 27);
        assert!(test_square(bb, 27));
        assert!(!test_square(bb, 28));
        assert_eq!(clear_square(bb, 27), EMPTY);
    }

    #[test]
    fn iterator_yields_squares_in_order() {
        let bb = square_mask(3) | square_mask(40) | square_mask(63);
        assert_eq!(squares(bb).collect::<Vec<_>>(), vec![3, 40, 63]);
        assert_eq!(squares(bb).len(), 3);
    }

    #[test]
    fn pop_lsb_drains_bitboard() {
        let mut bb = FILE_H & RANK_8;
        assert_eq!(pop_lsb(&mut bb), Some(63));
        assert_eq!(pop_lsb(&mut bb), None);
    }
}
