//! Twelve-bitboard piece placement.
//!
//! `Board` is plain copyable data: one bitboard per `(color, piece kind)`
//! plus occupancy caches kept in step by the three mutators. Mutators trust
//! the caller; legality lives in move generation and `GameState`.

use crate::game_state::bitboard::{square_mask, squares};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    // [color][piece_kind]
    pieces: [[Bitboard; 6]; 2],
    occupancy_by_color: [Bitboard; 2],
    occupancy_all: Bitboard,
}

impl Board {
    #[inline]
    pub const fn empty_board() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
        }
    }

    #[inline]
    pub const fn pieces(&self, piece: PieceKind, color: Color) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub const fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        self.occupancy_all
    }

    #[inline]
    pub const fn empty(&self) -> Bitboard {
        !self.occupancy_all
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupancy_all & square_mask(square) != 0
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(PieceKind::King, color);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Piece of the given color on `square`.
    #[inline]
    pub fn piece_kind_at(&self, square: Square, color: Color) -> Option<PieceKind> {
        let mask = square_mask(square);
        if self.occupancy_by_color[color.index()] & mask == 0 {
            return None;
        }
        ALL_PIECE_KINDS
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()] & mask != 0)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = square_mask(square);
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::Light.index()] & mask != 0 {
            Color::Light
        } else {
            Color::Dark
        };
        self.piece_kind_at(square, color).map(|piece| (color, piece))
    }

    #[inline]
    pub fn add_piece(&mut self, square: Square, piece: PieceKind, color: Color) {
        let mask = square_mask(square);
        self.pieces[color.index()][piece.index()] |= mask;
        self.occupancy_by_color[color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    #[inline]
    pub fn remove_piece(&mut self, square: Square, piece: PieceKind, color: Color) {
        let mask = !square_mask(square);
        self.pieces[color.index()][piece.index()] &= mask;
        self.occupancy_by_color[color.index()] &= mask;
        self.occupancy_all &= mask;
    }

    #[inline]
    pub fn move_piece(&mut self, from: Square, to: Square, piece: PieceKind, color: Color) {
        let from_to = square_mask(from) | square_mask(to);
        self.pieces[color.index()][piece.index()] ^= from_to;
        self.occupancy_by_color[color.index()] ^= from_to;
        self.occupancy_all ^= from_to;
    }

    /// Independent copy of the placement.
    #[inline]
    pub const fn copy(&self) -> Self {
        *self
    }

    /// Vertically flipped placement with colors swapped.
    pub fn mirrored(&self) -> Self {
        let mut out = Self::empty_board();
        for color in [Color::Light, Color::Dark] {
            for piece in ALL_PIECE_KINDS {
                for square in squares(self.pieces(piece, color)) {
                    out.add_piece(flip_vertical(square), piece, color.opposite());
                }
            }
        }
        out
    }

    /// Iterate `(square, color, piece)` for every occupied square.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, Color, PieceKind)> + '_ {
        [Color::Light, Color::Dark].into_iter().flat_map(move |color| {
            ALL_PIECE_KINDS.into_iter().flat_map(move |piece| {
                squares(self.pieces(piece, color)).map(move |square| (square, color, piece))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_move_remove_keep_occupancy_in_step() {
        let mut board = Board::empty_board();
        board.add_piece(12, PieceKind::Pawn, Color::Light);
        board.add_piece(52, PieceKind::Pawn, Color::Dark);
        assert_eq!(board.occupied().count_ones(), 2);

        board.move_piece(12, 28, PieceKind::Pawn, Color::Light);
        assert_eq!(board.piece_at(28), Some((Color::Light, PieceKind::Pawn)));
        assert_eq!(board.piece_at(12), None);
        assert!(!board.is_occupied(12));

        board.remove_piece(52, PieceKind::Pawn, Color::Dark);
        assert_eq!(board.occupancy(Color::Dark), 0);
        assert_eq!(board.occupied(), 1u64 << 28);
        assert_eq!(board.empty(), !(1u64 << 28));
    }

    #[test]
    fn copy_is_independent() {
        let mut board = Board::empty_board();
        board.add_piece(4, PieceKind::King, Color::Light);
        let snapshot = board.copy();
        board.remove_piece(4, PieceKind::King, Color::Light);
        assert_eq!(snapshot.king_square(Color::Light), Some(4));
        assert_eq!(board.king_square(Color::Light), None);
    }

    #[test]
    fn mirrored_swaps_colors_and_ranks() {
        let mut board = Board::empty_board();
        board.add_piece(1, PieceKind::Knight, Color::Light);
        let mirrored = board.mirrored();
        assert_eq!(mirrored.piece_at(57), Some((Color::Dark, PieceKind::Knight)));
        assert_eq!(mirrored.mirrored(), board);
    }
}
