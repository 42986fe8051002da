use crate::game_state::bitboard::squares;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_piece_targets;
use crate::moves::chess_move::ChessMove;
use crate::moves::sliding_attacks::sliding_attacks;

/// Bishop, rook and queen moves through the magic lookup tables.
pub fn generate_slider_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let board = &game_state.board;
    let own_occ = board.occupancy(side);
    let enemy_occ = board.occupancy(side.opposite());
    let occupied = board.occupied();

    for piece in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        for from in squares(board.pieces(piece, side)) {
            let targets = sliding_attacks(piece, from, occupied) & !own_occ;
            push_piece_targets(out, from, targets, piece, side, enemy_occ);
        }
    }
}
