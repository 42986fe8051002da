//! Helpers shared by the per-piece generators.

use crate::game_state::bitboard::{squares, Bitboard};
use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::{ChessMove, MoveKind};

/// Expand a destination set into moves, tagging captures against `enemy_occ`.
#[inline]
pub fn push_piece_targets(
    out: &mut Vec<ChessMove>,
    from: Square,
    targets: Bitboard,
    piece: PieceKind,
    color: Color,
    enemy_occ: Bitboard,
) {
    for to in squares(targets) {
        let kind = if enemy_occ & (1u64 << to) != 0 {
            MoveKind::Capture
        } else {
            MoveKind::Normal
        };
        out.push(ChessMove::new(from, to, piece, color, kind));
    }
}

/// Push a pawn move, fanning out into one move per promotion piece on the back rank.
#[inline]
pub fn push_pawn_move(out: &mut Vec<ChessMove>, from: Square, to: Square, color: Color, kind: MoveKind) {
    if rank_of(to) == promotion_rank(color) {
        out.extend(
            PROMOTION_KINDS
                .iter()
                .map(|&promotion| ChessMove::promotion(from, to, color, promotion)),
        );
    } else {
        out.push(ChessMove::new(from, to, PieceKind::Pawn, color, kind));
    }
}
