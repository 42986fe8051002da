use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// Everything `undo_move` needs to restore the position before `mv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReversibleMove {
    pub mv: ChessMove,
    pub prev_side_to_move: Color,
    /// Captured piece and the square it stood on (differs from `mv.to` for en passant).
    pub captured: Option<(PieceKind, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
}
