use crate::game_state::bitboard::{square_mask, squares};
use crate::game_state::chess_rules::{pawn_start_rank, promotion_rank};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_pawn_move;
use crate::moves::chess_move::{ChessMove, MoveKind};
use crate::moves::step_attacks::pawn_attacks;

pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let board = &game_state.board;
    let enemy_occ = board.occupancy(side.opposite());
    let push = side.pawn_push_offset();

    for from in squares(board.pieces(PieceKind::Pawn, side)) {
        // A pawn already on its last rank (malformed import) has no moves.
        if rank_of(from) == promotion_rank(side) {
            continue;
        }

        let one_step = (from as i8 + push) as Square;
        if !board.is_occupied(one_step) {
            push_pawn_move(out, from, one_step, side, MoveKind::Normal);

            if rank_of(from) == pawn_start_rank(side) {
                let two_step = (one_step as i8 + push) as Square;
                if !board.is_occupied(two_step) {
                    out.push(ChessMove::new(from, two_step, PieceKind::Pawn, side, MoveKind::Normal));
                }
            }
        }

        let attacks = pawn_attacks(side, from);
        for to in squares(attacks & enemy_occ) {
            push_pawn_move(out, from, to, side, MoveKind::Capture);
        }

        if let Some(ep) = game_state.en_passant_square {
            let victim = (ep as i8 - push) as Square;
            if attacks & square_mask(ep) != 0
                && !board.is_occupied(ep)
                && board.pieces(PieceKind::Pawn, side.opposite()) & square_mask(victim) != 0
            {
                out.push(ChessMove::new(from, ep, PieceKind::Pawn, side, MoveKind::EnPassant));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pawn_moves(fen: &str) -> Vec<String> {
        let state = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&state, &mut out);
        let mut moves: Vec<String> = out.iter().map(|mv| mv.to_string()).collect();
        moves.sort();
        moves
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        assert_eq!(pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"), vec!["e2e3", "e2e4"]);
    }

    #[test]
    fn blocked_pawn_has_no_pushes() {
        assert!(pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").is_empty());
    }

    #[test]
    fn promotion_yields_four_moves_per_destination() {
        let moves = pawn_moves("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(moves.len(), 8);
        assert!(moves.contains(&"a7b8n".to_owned()));
        assert!(moves.contains(&"a7a8q".to_owned()));
    }

    #[test]
    fn dark_pawn_en_passant() {
        let moves = pawn_moves("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1");
        assert_eq!(moves, vec!["e4d3", "e4e3"]);
    }
}
