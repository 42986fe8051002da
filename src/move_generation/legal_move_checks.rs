//! Attack queries over a board.
//!
//! Every query takes the occupancy to use for slider rays explicitly where it
//! matters, so callers can ask "what if this piece were gone" without
//! mutating the board (king-danger maps, static exchange).

use crate::game_state::bitboard::{square_mask, squares, Bitboard};
use crate::game_state::chess_rules::CastlingLane;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::sliding_attacks::{bishop_attacks, rook_attacks, sliding_attacks};
use crate::moves::step_attacks::{king_attacks, knight_attacks, pawn_attacks};

/// Pieces of `attacker_color` that attack `square`, rays traced through `occupancy`.
///
/// Only pieces still present in `occupancy` are reported.
pub fn attackers_of_color(
    board: &Board,
    square: Square,
    attacker_color: Color,
    occupancy: Bitboard,
) -> Bitboard {
    let pieces = |piece| board.pieces(piece, attacker_color);
    let diagonal = pieces(PieceKind::Bishop) | pieces(PieceKind::Queen);
    let straight = pieces(PieceKind::Rook) | pieces(PieceKind::Queen);

    let attackers = (pawn_attacks(attacker_color.opposite(), square) & pieces(PieceKind::Pawn))
        | (knight_attacks(square) & pieces(PieceKind::Knight))
        | (king_attacks(square) & pieces(PieceKind::King))
        | (bishop_attacks(square, occupancy) & diagonal)
        | (rook_attacks(square, occupancy) & straight);

    attackers & occupancy
}

#[inline]
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    attackers_of_color(board, square, attacker_color, board.occupied()) != 0
}

/// A missing king is never in check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king_sq| is_square_attacked(board, king_sq, color.opposite()))
}

/// Union of every square `attacker_color` attacks, slider rays traced through `occupancy`.
pub fn attacked_squares(board: &Board, attacker_color: Color, occupancy: Bitboard) -> Bitboard {
    let mut attacked = 0u64;

    for from in squares(board.pieces(PieceKind::Pawn, attacker_color)) {
        attacked |= pawn_attacks(attacker_color, from);
    }
    for from in squares(board.pieces(PieceKind::Knight, attacker_color)) {
        attacked |= knight_attacks(from);
    }
    for from in squares(board.pieces(PieceKind::King, attacker_color)) {
        attacked |= king_attacks(from);
    }
    for piece in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        for from in squares(board.pieces(piece, attacker_color)) {
            attacked |= sliding_attacks(piece, from, occupancy);
        }
    }

    attacked
}

/// Squares the king of `color` may not step onto.
///
/// The king itself is lifted from the occupancy so it cannot shadow the
/// squares behind it from a checking slider.
#[inline]
pub fn king_danger_squares(board: &Board, color: Color) -> Bitboard {
    let occupancy = board.occupied() & !board.pieces(PieceKind::King, color);
    attacked_squares(board, color.opposite(), occupancy)
}

/// Whether `lane` can be castled in the current position.
pub fn can_castle(game_state: &GameState, lane: &CastlingLane) -> bool {
    let board = &game_state.board;
    let enemy = lane.color.opposite();

    game_state.castling_rights & lane.right != 0
        && board.pieces(PieceKind::King, lane.color) & square_mask(lane.king_from) != 0
        && board.pieces(PieceKind::Rook, lane.color) & square_mask(lane.rook_from) != 0
        && board.occupied() & lane.must_be_empty == 0
        && lane
            .king_path
            .iter()
            .all(|&square| !is_square_attacked(board, square, enemy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::CASTLING_LANES;

    #[test]
    fn pawn_and_knight_attacks_are_detected() {
        let state = GameState::from_fen("4k3/8/8/3p4/8/8/5N2/4K3 w - - 0 1").expect("FEN should parse");
        let e4 = 28;
        assert!(is_square_attacked(&state.board, e4, Color::Dark), "d5 pawn hits e4");
        assert!(is_square_attacked(&state.board, e4, Color::Light), "f2 knight hits e4");
        assert!(!is_square_attacked(&state.board, 36, Color::Light));
    }

    #[test]
    fn king_check_through_open_file() {
        let state = GameState::from_fen("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(is_king_in_check(&state.board, Color::Light));
        assert!(!is_king_in_check(&state.board, Color::Dark));
    }

    #[test]
    fn king_danger_includes_square_behind_king() {
        let state = GameState::from_fen("4r1k1/8/8/8/8/8/4K3/8 w - - 0 1").expect("FEN should parse");
        let e1 = 4;
        let danger = king_danger_squares(&state.board, Color::Light);
        assert_ne!(danger & square_mask(e1), 0);
        assert_eq!(attacked_squares(&state.board, Color::Dark, state.board.occupied()) & square_mask(e1), 0);
    }

    #[test]
    fn attackers_respect_removed_occupancy() {
        let state = GameState::from_fen("3qk3/8/8/8/3p4/8/3R4/3RK3 w - - 0 1").expect("FEN should parse");
        let d4 = 27;
        let board = &state.board;
        let light = attackers_of_color(board, d4, Color::Light, board.occupied());
        assert_eq!(light, square_mask(11), "d1 rook is hidden behind d2");
        let without_d2 = board.occupied() & !square_mask(11);
        assert_eq!(
            attackers_of_color(board, d4, Color::Light, without_d2),
            square_mask(3)
        );
    }

    #[test]
    fn castling_blocked_by_attacked_transit() {
        let state = GameState::from_fen("5r2/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        assert!(!can_castle(&state, &CASTLING_LANES[0]));
        assert!(can_castle(&state, &CASTLING_LANES[1]));
        assert!(!can_castle(&state, &CASTLING_LANES[2]));
    }
}
