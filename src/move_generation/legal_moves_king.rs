use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::can_castle;
use crate::move_generation::legal_move_shared::push_piece_targets;
use crate::moves::chess_move::{ChessMove, MoveKind};
use crate::moves::step_attacks::king_attacks;

pub fn generate_king_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    let board = &game_state.board;
    let Some(from) = board.king_square(side) else {
        return;
    };

    let targets = king_attacks(from) & !board.occupancy(side);
    push_piece_targets(out, from, targets, PieceKind::King, side, board.occupancy(side.opposite()));

    generate_castling_moves(game_state, out);
}

fn generate_castling_moves(game_state: &GameState, out: &mut Vec<ChessMove>) {
    let side = game_state.side_to_move;
    for lane in CASTLING_LANES.iter().filter(|lane| lane.color == side) {
        if can_castle(game_state, lane) {
            out.push(ChessMove::new(
                lane.king_from,
                lane.king_to,
                PieceKind::King,
                side,
                MoveKind::Castle,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn castles(fen: &str) -> Vec<String> {
        let state = GameState::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&state, &mut out);
        out.iter()
            .filter(|mv| mv.is_castle())
            .map(|mv| mv.to_string())
            .collect()
    }

    #[test]
    fn both_castles_on_open_back_rank() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), vec!["e1g1", "e1c1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), vec!["e8g8", "e8c8"]);
    }

    #[test]
    fn no_castling_out_of_check_or_through_pieces() {
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
        assert_eq!(castles("6k1/8/8/8/8/8/8/RN2K2R w KQ - 0 1"), vec!["e1g1"]);
    }

    #[test]
    fn queenside_allowed_when_only_b_file_attacked() {
        assert_eq!(castles("1r4k1/8/8/8/8/8/8/R3K3 w Q - 0 1"), vec!["e1c1"]);
    }
}
