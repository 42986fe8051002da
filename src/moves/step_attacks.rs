//! Precomputed attack masks for stepping pieces (knight, king, pawn).
//!
//! Tables are built at compile time by enumerating each piece's fixed
//! `(file, rank)` offsets and dropping targets that would wrap off the board.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const LIGHT_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const DARK_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = generate_step_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = generate_step_table(&KING_OFFSETS);
pub const LIGHT_PAWN_ATTACKS: [u64; 64] = generate_step_table(&LIGHT_PAWN_OFFSETS);
pub const DARK_PAWN_ATTACKS: [u64; 64] = generate_step_table(&DARK_PAWN_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` on `square` attacks diagonally.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

const fn generate_step_table<const N: usize>(offsets: &[(i32, i32); N]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < N {
            attacks |= target_bit(file + offsets[i].0, rank + offsets[i].1);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn target_bit(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << (rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_attacks_from_center_and_corner() {
        let d4 = 27;
        assert_eq!(knight_attacks(d4).count_ones(), 8);
        assert_eq!(knight_attacks(0), (1u64 << 10) | (1u64 << 17));
    }

    #[test]
    fn king_attacks_do_not_wrap_files() {
        let h4 = 31;
        let attacks = king_attacks(h4);
        assert_eq!(attacks.count_ones(), 5);
        assert_eq!(attacks & (1u64 << 32), 0, "a5 must not be reachable from h4");
    }

    #[test]
    fn pawn_attacks_follow_color_direction() {
        let e4 = 28;
        assert_eq!(pawn_attacks(Color::Light, e4), (1u64 << 35) | (1u64 << 37));
        assert_eq!(pawn_attacks(Color::Dark, e4), (1u64 << 19) | (1u64 << 21));
        assert_eq!(pawn_attacks(Color::Light, 8).count_ones(), 1);
    }
}
