//! Move ordering heuristics and static exchange evaluation.
//!
//! Captures are ranked by MVV-LVA above every quiet move; promotions rank by
//! the promoted piece; castling and early development get small nudges.

use std::cmp::Reverse;

use crate::game_state::bitboard::{square_mask, squares, Bitboard};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::attackers_of_color;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::MaterialScorer;

/// `[victim][attacker]`; capturing a king never happens in legal play.
const MVV_LVA: [[i32; 6]; 6] = [
    [15, 14, 13, 12, 11, 10],
    [25, 24, 23, 22, 21, 20],
    [35, 34, 33, 32, 31, 30],
    [45, 44, 43, 42, 41, 40],
    [55, 54, 53, 52, 51, 50],
    [0, 0, 0, 0, 0, 0],
];

const CAPTURE_BASE: i32 = 1_000;
const PROMOTION_BASE: i32 = 2_000;
const CASTLE_BONUS: i32 = 60;
const CENTRAL_PAWN_BONUS: i32 = 50;
const DEVELOPMENT_BONUS: i32 = 30;
const OPENING_FULLMOVES: u16 = 10;

/// Heuristic ordering score; higher is searched first.
pub fn score_move(mv: &ChessMove, game_state: &GameState) -> i32 {
    let mut score = 0;

    if let Some(victim) = mv.captured_piece(&game_state.board) {
        score += CAPTURE_BASE + MVV_LVA[victim.index()][mv.piece.index()];
    }

    if let Some(promotion) = mv.promotion {
        score += PROMOTION_BASE + MaterialScorer::piece_value(promotion);
    }

    if mv.is_castle() {
        score += CASTLE_BONUS;
    }

    if game_state.fullmove_number <= OPENING_FULLMOVES {
        match mv.piece {
            PieceKind::Pawn => {
                let central = |square: Square| matches!(file_of(square), 3 | 4);
                if central(mv.from) && central(mv.to) {
                    score += CENTRAL_PAWN_BONUS;
                }
            }
            PieceKind::Knight | PieceKind::Bishop => {
                let back_rank = |square: Square| matches!(rank_of(square), 0 | 7);
                if back_rank(mv.from) && !back_rank(mv.to) {
                    score += DEVELOPMENT_BONUS;
                }
            }
            _ => {}
        }
    }

    score
}

/// Same moves, sorted by descending `score_move`; ties keep generation order.
pub fn order_moves(mut moves: Vec<ChessMove>, game_state: &GameState) -> Vec<ChessMove> {
    moves.sort_by_cached_key(|mv| Reverse(score_move(mv, game_state)));
    moves
}

/// Static exchange evaluation of `mv` on its destination square.
///
/// Plays out the capture sequence with each side recapturing with its least
/// valuable attacker, re-tracing slider rays as pieces leave the square's
/// lines, then folds the gain list back with negamax. A king only recaptures
/// when the opponent has nothing left attacking the square. Non-captures
/// score 0.
pub fn see(game_state: &GameState, mv: ChessMove) -> i32 {
    let board = &game_state.board;
    let Some(victim) = mv.captured_piece(board) else {
        return 0;
    };

    let target = mv.to;
    let mut occupancy = board.occupied() & !square_mask(mv.from);
    if mv.is_en_passant() {
        occupancy &= !square_mask(mv.capture_square());
    }

    let mut gains = [0i32; 32];
    gains[0] = value(victim);
    if let Some(promotion) = mv.promotion {
        gains[0] += value(promotion) - value(PieceKind::Pawn);
    }

    let mut on_target = mv.promotion.unwrap_or(mv.piece);
    let mut side = mv.color.opposite();
    let mut depth = 0usize;

    while depth + 1 < gains.len() {
        let attackers = attackers_of_color(board, target, side, occupancy);
        let Some((from, piece)) = least_valuable_attacker(board, attackers, side) else {
            break;
        };

        if piece == PieceKind::King {
            let remaining = occupancy & !square_mask(from);
            if attackers_of_color(board, target, side.opposite(), remaining) != 0 {
                break;
            }
        }

        depth += 1;
        gains[depth] = value(on_target) - gains[depth - 1];
        if on_target == PieceKind::King {
            break;
        }

        occupancy &= !square_mask(from);
        on_target = piece;
        side = side.opposite();
    }

    while depth > 0 {
        gains[depth - 1] = -(-gains[depth - 1]).max(gains[depth]);
        depth -= 1;
    }

    gains[0]
}

#[inline]
fn value(piece: PieceKind) -> i32 {
    MaterialScorer::piece_value(piece)
}

fn least_valuable_attacker(board: &Board, attackers: Bitboard, color: Color) -> Option<(Square, PieceKind)> {
    ALL_PIECE_KINDS.into_iter().find_map(|piece| {
        squares(attackers & board.pieces(piece, color))
            .next()
            .map(|square| (square, piece))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn legal(game_state: &GameState, text: &str) -> ChessMove {
        ChessMove::from_long_algebraic(text, game_state).expect("move should be legal")
    }

    #[test]
    fn rook_takes_pawn_defended_by_queen_loses_material() {
        let game = state("4k3/4q3/8/4p3/8/8/8/4R2K w - - 0 1");
        assert_eq!(see(&game, legal(&game, "e1e5")), -400);
    }

    #[test]
    fn undefended_pawn_capture_wins_a_pawn() {
        let game = state("4k3/8/8/4p3/8/8/8/4R2K w - - 0 1");
        assert_eq!(see(&game, legal(&game, "e1e5")), 100);
    }

    #[test]
    fn xray_rook_behind_rook_joins_the_exchange() {
        let game = state("k3r3/8/8/4p3/8/8/4R3/4R2K w - - 0 1");
        assert_eq!(see(&game, legal(&game, "e2e5")), 100);
    }

    #[test]
    fn pawn_takes_defended_knight_is_still_good() {
        let game = state("4k3/8/3p4/4n3/3P4/8/8/4K3 w - - 0 1");
        assert_eq!(see(&game, legal(&game, "d4e5")), 220);
    }

    #[test]
    fn king_does_not_recapture_into_defended_square() {
        // Black king on d6 "defends" e5, but the bishop on b2 still covers it.
        let game = state("8/8/3k4/4p3/8/8/1B6/4R2K w - - 0 1");
        assert_eq!(see(&game, legal(&game, "e1e5")), 100);
    }

    #[test]
    fn quiet_move_has_zero_exchange_value() {
        let game = GameState::new_game();
        assert_eq!(see(&game, legal(&game, "e2e4")), 0);
    }

    #[test]
    fn ordering_puts_captures_and_promotions_first() {
        let game = state("1n2k3/P7/8/8/8/3q4/8/R3K3 w Q - 0 30");
        let ordered = order_moves(game.legal_moves(), &game);
        assert_eq!(ordered[0].to_string(), "a7b8q");
        let tactical = |mv: &ChessMove| mv.is_capture_on(&game.board) || mv.promotion.is_some();
        let first_quiet = ordered
            .iter()
            .position(|mv| !tactical(mv))
            .expect("quiet moves exist");
        assert_eq!(first_quiet, 8, "four capturing and four quiet promotions");
        assert!(ordered[first_quiet..].iter().all(|mv| !tactical(mv)));
    }

    #[test]
    fn opening_nudges_center_pawns_and_development() {
        let game = GameState::new_game();
        let e4 = score_move(&legal(&game, "e2e4"), &game);
        let nf3 = score_move(&legal(&game, "g1f3"), &game);
        let a3 = score_move(&legal(&game, "a2a3"), &game);
        assert_eq!(e4, CENTRAL_PAWN_BONUS);
        assert_eq!(nf3, DEVELOPMENT_BONUS);
        assert_eq!(a3, 0);
        let ordered = order_moves(game.legal_moves(), &game);
        assert_eq!(ordered.len(), 20);
        assert_eq!(score_move(&ordered[0], &game), CENTRAL_PAWN_BONUS);
    }
}
