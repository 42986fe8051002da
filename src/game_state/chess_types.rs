//! Primitive value types shared by the board model, move generation and search.

pub use crate::game_state::bitboard::Bitboard;
pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::ReversibleMove;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank offset of a single pawn push (`+8` for light, `-8` for dark).
    #[inline]
    pub const fn pawn_push_offset(self) -> i8 {
        match self {
            Color::Light => 8,
            Color::Dark => -8,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase letter used by FEN and long algebraic promotion suffixes.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Four independent castling flags packed into the low nibble.
///
/// The packed value doubles as the index into the Zobrist castling keys.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0x0F;

/// Board square index (`0..=63`, a1 = 0, h8 = 63).
pub type Square = u8;

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn square_at(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

/// Mirror a square across the horizontal axis (a1 <-> a8).
#[inline]
pub const fn flip_vertical(square: Square) -> Square {
    square ^ 56
}

/// Swap light and dark castling flags.
#[inline]
pub const fn mirror_castling_rights(rights: CastlingRights) -> CastlingRights {
    ((rights & 0b0011) << 2) | ((rights & 0b1100) >> 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_coordinates_round_trip() {
        let e4 = square_at(4, 3);
        assert_eq!(e4, 28);
        assert_eq!(file_of(e4), 4);
        assert_eq!(rank_of(e4), 3);
        assert_eq!(flip_vertical(e4), 36);
    }

    #[test]
    fn mirrored_castling_swaps_sides() {
        assert_eq!(
            mirror_castling_rights(CASTLE_LIGHT_KINGSIDE | CASTLE_DARK_QUEENSIDE),
            CASTLE_DARK_KINGSIDE | CASTLE_LIGHT_QUEENSIDE
        );
        assert_eq!(mirror_castling_rights(CASTLE_ALL), CASTLE_ALL);
    }
}
