//! Zobrist hashing for position identity.
//!
//! Keys are drawn once from a fixed-seed `StdRng`, so hashes are stable
//! across runs. The hash depends only on placement, side to move, castling
//! rights and en-passant file; move counters never contribute.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::{chess_types::*, game_state::GameState};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random();
            }
        }
    }

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move: rng.random(),
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

/// Key for a packed castling-rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & CASTLE_ALL) as usize]
}

#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[file as usize]
}

/// Xor-ed in when dark is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// En-passant contribution of an optional target square.
#[inline]
pub fn en_passant_key(en_passant_square: Option<Square>) -> u64 {
    en_passant_square.map_or(0, |square| en_passant_file_key(file_of(square)))
}

/// Full recomputation of the position key.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = game_state
        .board
        .occupied_squares()
        .fold(0u64, |acc, (square, color, piece)| {
            acc ^ piece_square_key(color, piece, square)
        });

    if game_state.side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }
    key ^= castling_key(game_state.castling_rights);
    key ^= en_passant_key(game_state.en_passant_square);

    key
}
