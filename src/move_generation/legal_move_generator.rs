//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal moves piece by piece for the side to move, then
//! filters out moves that leave the mover's king attacked. Non-king moves are
//! probed on a scratch copy of the board; plain king moves are checked
//! against a danger map computed once per position.

use crate::game_state::bitboard::{square_mask, Bitboard};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move_to_board;
use crate::move_generation::legal_move_checks::{is_king_in_check, king_danger_squares};
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::generate_slider_moves;
use crate::moves::chess_move::ChessMove;

/// Moves obeying piece movement rules, ignoring own-king safety.
///
/// Castling is only emitted when its full predicate holds.
pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(64);
    generate_pawn_moves(game_state, &mut moves);
    generate_knight_moves(game_state, &mut moves);
    generate_slider_moves(game_state, &mut moves);
    generate_king_moves(game_state, &mut moves);
    moves
}

pub fn generate_legal_moves(game_state: &GameState) -> Vec<ChessMove> {
    let pseudo = generate_pseudo_legal_moves(game_state);
    let danger = king_danger_squares(&game_state.board, game_state.side_to_move);
    pseudo
        .into_iter()
        .filter(|&mv| is_legal_with_danger(&game_state.board, mv, danger))
        .collect()
}

/// Legal captures, en passant and capturing promotions.
pub fn generate_legal_captures(game_state: &GameState) -> Vec<ChessMove> {
    let board = &game_state.board;
    let danger = king_danger_squares(board, game_state.side_to_move);
    generate_pseudo_legal_moves(game_state)
        .into_iter()
        .filter(|mv| mv.is_capture_on(board))
        .filter(|&mv| is_legal_with_danger(board, mv, danger))
        .collect()
}

/// Short-circuits on the first legal move.
pub fn has_legal_move(game_state: &GameState) -> bool {
    let danger = king_danger_squares(&game_state.board, game_state.side_to_move);
    generate_pseudo_legal_moves(game_state)
        .into_iter()
        .any(|mv| is_legal_with_danger(&game_state.board, mv, danger))
}

/// Whether a pseudo-legal move keeps the mover's king safe.
pub fn is_legal_move(board: &Board, mv: ChessMove) -> bool {
    is_legal_with_danger(board, mv, king_danger_squares(board, mv.color))
}

fn is_legal_with_danger(board: &Board, mv: ChessMove, king_danger: Bitboard) -> bool {
    if mv.piece == PieceKind::King && !mv.is_castle() {
        return king_danger & square_mask(mv.to) == 0;
    }

    let mut scratch = board.copy();
    apply_move_to_board(&mut scratch, mv);
    !is_king_in_check(&scratch, mv.color)
}
