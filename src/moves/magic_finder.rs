//! Magic-bitboard construction for sliding pieces.
//!
//! This file is compiled twice: by `build.rs`, which searches for magic
//! multipliers and writes them to `$OUT_DIR/magic_numbers.rs`, and by the
//! library, which rebuilds the attack tables from those multipliers at first
//! use. It therefore only depends on `core`/`std` and `rand`.

use rand::Rng;

/// `(file_step, rank_step)` rays of a rook.
pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
/// `(file_step, rank_step)` rays of a bishop.
pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Upper bound on candidates tried per square before giving up.
pub const MAX_MAGIC_ATTEMPTS: u64 = 100_000_000;

/// A verified multiplier for one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicEntry {
    pub magic: u64,
    pub index_bits: u32,
}

/// Squares whose occupancy can change the attack set from `square`.
///
/// Each ray stops one short of the board edge: a blocker on the last square
/// of a ray never hides anything behind it.
pub fn relevant_occupancy_mask(square: u8, directions: &[(i32, i32); 4]) -> u64 {
    let mut mask = 0u64;
    let file = (square % 8) as i32;
    let rank = (square / 8) as i32;

    for &(df, dr) in directions {
        let mut f = file + df;
        let mut r = rank + dr;
        while on_board(f + df, r + dr) {
            mask |= 1u64 << (r * 8 + f);
            f += df;
            r += dr;
        }
    }

    mask
}

/// Attack set found by walking every ray until the first blocker (inclusive).
pub fn sliding_attacks_slow(square: u8, occupancy: u64, directions: &[(i32, i32); 4]) -> u64 {
    let mut attacks = 0u64;
    let file = (square % 8) as i32;
    let rank = (square / 8) as i32;

    for &(df, dr) in directions {
        let mut f = file + df;
        let mut r = rank + dr;
        while on_board(f, r) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            f += df;
            r += dr;
        }
    }

    attacks
}

/// Every subset of `mask`, starting with the empty set.
pub fn occupancy_subsets(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1usize << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

#[inline]
pub fn magic_index(masked_occupancy: u64, magic: u64, index_bits: u32) -> usize {
    (masked_occupancy.wrapping_mul(magic) >> (64 - index_bits)) as usize
}

/// Search for a multiplier that maps every occupancy subset of `square`'s
/// mask to a slot holding the right attack set.
///
/// Two subsets may share a slot only when their attack sets are identical.
/// Returns `None` once `MAX_MAGIC_ATTEMPTS` candidates have failed.
pub fn find_magic<R: Rng>(
    square: u8,
    directions: &[(i32, i32); 4],
    rng: &mut R,
) -> Option<MagicEntry> {
    let mask = relevant_occupancy_mask(square, directions);
    let index_bits = mask.count_ones();
    let subsets = occupancy_subsets(mask);
    let attacks: Vec<u64> = subsets
        .iter()
        .map(|&occupancy| sliding_attacks_slow(square, occupancy, directions))
        .collect();

    let mut table: Vec<Option<u64>> = vec![None; 1usize << index_bits];

    for _ in 0..MAX_MAGIC_ATTEMPTS {
        let magic = sparse_random(rng);
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }

        table.fill(None);
        let collision_free = subsets.iter().zip(&attacks).all(|(&occupancy, &attack)| {
            let slot = &mut table[magic_index(occupancy, magic, index_bits)];
            match *slot {
                None => {
                    *slot = Some(attack);
                    true
                }
                Some(existing) => existing == attack,
            }
        });

        if collision_free {
            return Some(MagicEntry { magic, index_bits });
        }
    }

    None
}

fn sparse_random<R: Rng>(rng: &mut R) -> u64 {
    rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>()
}

#[inline]
const fn on_board(file: i32, rank: i32) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}
