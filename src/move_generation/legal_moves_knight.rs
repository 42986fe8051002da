use crate::game_state::bitboard::squares;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_piece_targets;
use crate::moves::chess_move::ChessMove;
use crate::moves::step_attacks::knight_attacks;

pub fn generate_knight_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let board = &game_state.board;
    let own_occ = board.occupancy(side);
    let enemy_occ = board.occupancy(side.opposite());

    for from in squares(board.pieces(PieceKind::Knight, side)) {
        let targets = knight_attacks(from) & !own_occ;
        push_piece_targets(out, from, targets, PieceKind::Knight, side, enemy_occ);
    }
}
