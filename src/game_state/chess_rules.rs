//! Canonical chess-rule constants.
//!
//! Starting position, castling geometry and draw-rule thresholds shared by
//! move generation, make/unmake and search.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move draw applies.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

pub const A1: Square = 0;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

/// Geometry of one castling option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub color: Color,
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub must_be_empty: Bitboard,
    /// Squares the king stands on or crosses; none may be attacked.
    pub king_path: [Square; 3],
}

pub const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        color: Color::Light,
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: E1,
        king_to: G1,
        rook_from: H1,
        rook_to: F1,
        must_be_empty: (1 << F1) | (1 << G1),
        king_path: [E1, F1, G1],
    },
    CastlingLane {
        color: Color::Light,
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: E1,
        king_to: C1,
        rook_from: A1,
        rook_to: D1,
        must_be_empty: (1 << 1) | (1 << C1) | (1 << D1),
        king_path: [E1, D1, C1],
    },
    CastlingLane {
        color: Color::Dark,
        right: CASTLE_DARK_KINGSIDE,
        king_from: E8,
        king_to: G8,
        rook_from: H8,
        rook_to: F8,
        must_be_empty: (1 << F8) | (1 << G8),
        king_path: [E8, F8, G8],
    },
    CastlingLane {
        color: Color::Dark,
        right: CASTLE_DARK_QUEENSIDE,
        king_from: E8,
        king_to: C8,
        rook_from: A8,
        rook_to: D8,
        must_be_empty: (1 << 57) | (1 << C8) | (1 << D8),
        king_path: [E8, D8, C8],
    },
];

/// Castling lane matching a king move, if the squares are the canonical ones.
#[inline]
pub fn castling_lane(color: Color, king_from: Square, king_to: Square) -> Option<&'static CastlingLane> {
    CASTLING_LANES
        .iter()
        .find(|lane| lane.color == color && lane.king_from == king_from && lane.king_to == king_to)
}

/// Castling right tied to a rook's original corner square.
#[inline]
pub const fn castling_right_for_rook_square(color: Color, square: Square) -> CastlingRights {
    match (color, square) {
        (Color::Light, H1) => CASTLE_LIGHT_KINGSIDE,
        (Color::Light, A1) => CASTLE_LIGHT_QUEENSIDE,
        (Color::Dark, H8) => CASTLE_DARK_KINGSIDE,
        (Color::Dark, A8) => CASTLE_DARK_QUEENSIDE,
        _ => 0,
    }
}

#[inline]
pub const fn castling_rights_of(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}

#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::Light => 7,
        Color::Dark => 0,
    }
}

#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}
