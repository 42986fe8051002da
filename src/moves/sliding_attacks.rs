//! Magic-bitboard lookups for rooks, bishops and queens.
//!
//! Multipliers come from the build script; the attack tables themselves are
//! filled once on first use.

use std::sync::OnceLock;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::magic_finder::{
    magic_index, occupancy_subsets, relevant_occupancy_mask, sliding_attacks_slow,
    BISHOP_DIRECTIONS, ROOK_DIRECTIONS,
};

include!(concat!(env!("OUT_DIR"), "/magic_numbers.rs"));

struct MagicTable {
    masks: [u64; 64],
    magics: [u64; 64],
    index_bits: [u32; 64],
    offsets: [usize; 64],
    attacks: Vec<u64>,
}

impl MagicTable {
    fn build(directions: &[(i32, i32); 4], magics: &[u64; 64], index_bits: &[u32; 64]) -> Self {
        let mut masks = [0u64; 64];
        let mut offsets = [0usize; 64];
        let mut attacks = Vec::new();

        for square in 0u8..64 {
            let sq = square as usize;
            let mask = relevant_occupancy_mask(square, directions);
            masks[sq] = mask;
            offsets[sq] = attacks.len();
            attacks.resize(attacks.len() + (1usize << index_bits[sq]), 0);

            for occupancy in occupancy_subsets(mask) {
                let slot = offsets[sq] + magic_index(occupancy, magics[sq], index_bits[sq]);
                attacks[slot] = sliding_attacks_slow(square, occupancy, directions);
            }
        }

        Self {
            masks,
            magics: *magics,
            index_bits: *index_bits,
            offsets,
            attacks,
        }
    }

    #[inline]
    fn lookup(&self, square: Square, occupancy: u64) -> u64 {
        let sq = square as usize;
        let index = magic_index(occupancy & self.masks[sq], self.magics[sq], self.index_bits[sq]);
        self.attacks[self.offsets[sq] + index]
    }
}

static ROOK_TABLE: OnceLock<MagicTable> = OnceLock::new();
static BISHOP_TABLE: OnceLock<MagicTable> = OnceLock::new();

fn rook_table() -> &'static MagicTable {
    ROOK_TABLE.get_or_init(|| MagicTable::build(&ROOK_DIRECTIONS, &ROOK_MAGICS, &ROOK_INDEX_BITS))
}

fn bishop_table() -> &'static MagicTable {
    BISHOP_TABLE
        .get_or_init(|| MagicTable::build(&BISHOP_DIRECTIONS, &BISHOP_MAGICS, &BISHOP_INDEX_BITS))
}

/// Fill both tables now instead of on the first lookup.
pub fn init_attack_tables() {
    let _ = rook_table();
    let _ = bishop_table();
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    rook_table().lookup(square, occupancy)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_table().lookup(square, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

/// Attack set of a sliding piece; empty for non-sliders.
#[inline]
pub fn sliding_attacks(piece: PieceKind, square: Square, occupancy: u64) -> u64 {
    match piece {
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        _ => 0,
    }
}
