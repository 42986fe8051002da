//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search delegates static scoring to `BoardScorer`, so heuristics can be
//! swapped without touching the search code. Scores are centipawns from the
//! requested color's point of view.

use crate::game_state::bitboard::{file_mask, Bitboard};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::has_legal_move;

/// Score of a side that has been checkmated, seen by the mated side (negated).
pub const MATE_SCORE: i32 = 1_000_000;

pub trait BoardScorer: Send + Sync {
    /// Static score of the position from `perspective`'s point of view.
    fn score(&self, game_state: &GameState, perspective: Color) -> i32;
}

#[inline]
fn relative(white_minus_black: i32, perspective: Color) -> i32 {
    match perspective {
        Color::Light => white_minus_black,
        Color::Dark => -white_minus_black,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20_000,
        }
    }

    #[inline]
    fn material_balance_white_minus_black(board: &Board) -> i32 {
        ALL_PIECE_KINDS
            .into_iter()
            .map(|piece| {
                let white = board.pieces(piece, Color::Light).count_ones() as i32;
                let black = board.pieces(piece, Color::Dark).count_ones() as i32;
                (white - black) * Self::piece_value(piece)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        relative(
            Self::material_balance_white_minus_black(&game_state.board),
            perspective,
        )
    }
}

// Middlegame / endgame base values and piece-square tables. Tables are laid
// out a8..h8 first, so a light piece on `sq` reads index `sq ^ 56` and a
// dark piece reads `sq` directly.
const MG_VALUE: [i32; 6] = [82, 337, 365, 477, 1025, 0];
const EG_VALUE: [i32; 6] = [94, 281, 297, 512, 936, 0];
const PHASE_INC: [i32; 6] = [0, 1, 1, 2, 4, 0];
const MAX_PHASE: i32 = 24;

#[rustfmt::skip]
const MG_PAWN: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
     98, 134,  61,  95,  68, 126,  34, -11,
     -6,   7,  26,  31,  65,  56,  25, -20,
    -14,  13,   6,  21,  23,  12,  17, -23,
    -27,  -2,  -5,  12,  17,   6,  10, -25,
    -26,  -4,  -4, -10,   3,   3,  33, -12,
    -35,  -1, -20, -23, -15,  24,  38, -22,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const EG_PAWN: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
    178, 173, 158, 134, 147, 132, 165, 187,
     94, 100,  85,  67,  56,  53,  82,  84,
     32,  24,  13,   5,  -2,   4,  17,  17,
     13,   9,  -3,  -7,  -7,  -8,   3,  -1,
      4,   7,  -6,   1,   0,  -5,  -1,  -8,
     13,   8,   8,  10,  13,   0,   2,  -7,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const MG_KNIGHT: [i32; 64] = [
    -167, -89, -34, -49,  61, -97, -15, -107,
     -73, -41,  72,  36,  23,  62,   7,  -17,
     -47,  60,  37,  65,  84, 129,  73,   44,
      -9,  17,  19,  53,  37,  69,  18,   22,
     -13,   4,  16,  13,  28,  19,  21,   -8,
     -23,  -9,  12,  10,  19,  17,  25,  -16,
     -29, -53, -12,  -3,  -1,  18, -14,  -19,
    -105, -21, -58, -33, -17, -28, -19,  -23,
];

#[rustfmt::skip]
const EG_KNIGHT: [i32; 64] = [
    -58, -38, -13, -28, -31, -27, -63, -99,
    -25,  -8, -25,  -2,  -9, -25, -24, -52,
    -24, -20,  10,   9,  -1,  -9, -19, -41,
    -17,   3,  22,  22,  22,  11,   8, -18,
    -18,  -6,  16,  25,  16,  17,   4, -18,
    -23,  -3,  -1,  15,  10,  -3, -20, -22,
    -42, -20, -10,  -5,  -2, -20, -23, -44,
    -29, -51, -23, -15, -22, -18, -50, -64,
];

#[rustfmt::skip]
const MG_BISHOP: [i32; 64] = [
    -29,   4, -82, -37, -25, -42,   7,  -8,
    -26,  16, -18, -13,  30,  59,  18, -47,
    -16,  37,  43,  40,  35,  50,  37,  -2,
     -4,   5,  19,  50,  37,  37,   7,  -2,
     -6,  13,  13,  26,  34,  12,  10,   4,
      0,  15,  15,  15,  14,  27,  18,  10,
      4,  15,  16,   0,   7,  21,  33,   1,
    -33,  -3, -14, -21, -13, -12, -39, -21,
];

#[rustfmt::skip]
const EG_BISHOP: [i32; 64] = [
    -14, -21, -11,  -8,  -7,  -9, -17, -24,
     -8,  -4,   7, -12,  -3, -13,  -4, -14,
      2,  -8,   0,  -1,  -2,   6,   0,   4,
     -3,   9,  12,   9,  14,  10,   3,   2,
     -6,   3,  13,  19,   7,  10,  -3,  -9,
    -12,  -3,   8,  10,  13,   3,  -7, -15,
    -14, -18,  -7,  -1,   4,  -9, -15, -27,
    -23,  -9, -23,  -5,  -9, -16,  -5, -17,
];

#[rustfmt::skip]
const MG_ROOK: [i32; 64] = [
     32,  42,  32,  51,  63,   9,  31,  43,
     27,  32,  58,  62,  80,  67,  26,  44,
     -5,  19,  26,  36,  17,  45,  61,  16,
    -24, -11,   7,  26,  24,  35,  -8, -20,
    -36, -26, -12,  -1,   9,  -7,   6, -23,
    -45, -25, -16, -17,   3,   0,  -5, -33,
    -44, -16, -20,  -9,  -1,  11,  -6, -71,
    -19, -13,   1,  17,  16,   7, -37, -26,
];

#[rustfmt::skip]
const EG_ROOK: [i32; 64] = [
     13,  10,  18,  15,  12,  12,   8,   5,
     11,  13,  13,  11,  -3,   3,   8,   3,
      7,   7,   7,   5,   4,  -3,  -5,  -3,
      4,   3,  13,   1,   2,   1,  -1,   2,
      3,   5,   8,   4,  -5,  -6,  -8, -11,
     -4,   0,  -5,  -1,  -7, -12,  -8, -16,
     -6,  -6,   0,   2,  -9,  -9, -11,  -3,
     -9,   2,   3,  -1,  -5, -13,   4, -20,
];

#[rustfmt::skip]
const MG_QUEEN: [i32; 64] = [
    -28,   0,  29,  12,  59,  44,  43,  45,
    -24, -39,  -5,   1, -16,  57,  28,  54,
    -13, -17,   7,   8,  29,  56,  47,  57,
    -27, -27, -16, -16,  -1,  17,  -2,   1,
     -9, -26,  -9, -10,  -2,  -4,   3,  -3,
    -14,   2, -11,  -2,  -5,   2,  14,   5,
    -35,  -8,  11,   2,   8,  15,  -3,   1,
     -1, -18,  -9,  10, -15, -25, -31, -50,
];

#[rustfmt::skip]
const EG_QUEEN: [i32; 64] = [
     -9,  22,  22,  27,  27,  19,  10,  20,
    -17,  20,  32,  41,  58,  25,  30,   0,
    -20,   6,   9,  49,  47,  35,  19,   9,
      3,  22,  24,  45,  57,  40,  57,  36,
    -18,  28,  19,  47,  31,  34,  39,  23,
    -16, -27,  15,   6,   9,  17,  10,   5,
    -22, -23, -30, -16, -16, -23, -36, -32,
    -33, -28, -22, -43,  -5, -32, -20, -41,
];

#[rustfmt::skip]
const MG_KING: [i32; 64] = [
    -65,  23,  16, -15, -56, -34,   2,  13,
     29,  -1, -20,  -7,  -8,  -4, -38, -29,
     -9,  24,   2, -16, -20,   6,  22, -22,
    -17, -20, -12, -27, -30, -25, -14, -36,
    -49,  -1, -27, -39, -46, -44, -33, -51,
    -14, -14, -22, -46, -44, -30, -15, -27,
      1,   7,  -8, -64, -43, -16,   9,   8,
    -15,  36,  12, -54,   8, -28,  24,  14,
];

#[rustfmt::skip]
const EG_KING: [i32; 64] = [
    -74, -35, -18, -18, -11,  15,   4, -17,
    -12,  17,  14,  17,  17,  38,  23,  11,
     10,  17,  23,  15,  20,  45,  44,  13,
     -8,  22,  24,  27,  26,  33,  26,   3,
    -18,  -4,  21,  24,  27,  23,   9, -11,
    -19,  -3,  11,  21,  23,  16,   7,  -9,
    -27, -11,   4,  13,  14,   4,  -5, -17,
    -53, -34, -21, -11, -28, -14, -24, -43,
];

const MG_TABLES: [[i32; 64]; 6] = [MG_PAWN, MG_KNIGHT, MG_BISHOP, MG_ROOK, MG_QUEEN, MG_KING];
const EG_TABLES: [[i32; 64]; 6] = [EG_PAWN, EG_KNIGHT, EG_BISHOP, EG_ROOK, EG_QUEEN, EG_KING];

#[inline]
const fn table_index(color: Color, square: Square) -> usize {
    match color {
        Color::Light => (square ^ 56) as usize,
        Color::Dark => square as usize,
    }
}

/// Middlegame/endgame blend of the PeSTO piece-square tables.
///
/// Phase grows with non-pawn material (knight/bishop 1, rook 2, queen 4,
/// capped at 24); a phase of 0 reads pure endgame values.
pub fn tapered_positional_white_minus_black(board: &Board) -> i32 {
    let mut mg = [0i32; 2];
    let mut eg = [0i32; 2];
    let mut phase = 0i32;

    for (square, color, piece) in board.occupied_squares() {
        let p = piece.index();
        let idx = table_index(color, square);
        mg[color.index()] += MG_VALUE[p] + MG_TABLES[p][idx];
        eg[color.index()] += EG_VALUE[p] + EG_TABLES[p][idx];
        phase += PHASE_INC[p];
    }

    let mg_score = mg[0] - mg[1];
    let eg_score = eg[0] - eg[1];
    let mg_phase = phase.min(MAX_PHASE);
    let eg_phase = MAX_PHASE - mg_phase;
    (mg_score * mg_phase + eg_score * eg_phase) / MAX_PHASE
}

const DOUBLED_PAWN_PENALTY: i32 = 12;
const ISOLATED_PAWN_PENALTY: i32 = 15;
const PAWN_SHIELD_BONUS: i32 = 10;

/// Penalties for doubled and isolated pawns of `color` (non-positive).
pub fn pawn_structure(board: &Board, color: Color) -> i32 {
    let pawns = board.pieces(PieceKind::Pawn, color);
    let mut score = 0;

    for file in 0..8u8 {
        let on_file = (pawns & file_mask(file)).count_ones() as i32;
        if on_file == 0 {
            continue;
        }
        if on_file > 1 {
            score -= DOUBLED_PAWN_PENALTY * (on_file - 1);
        }
        if pawns & adjacent_files(file) == 0 {
            score -= ISOLATED_PAWN_PENALTY * on_file;
        }
    }

    score
}

/// Bonus per own pawn on the two ranks in front of the king, king file and its neighbours.
pub fn king_pawn_shield(board: &Board, color: Color) -> i32 {
    let Some(king_sq) = board.king_square(color) else {
        return 0;
    };
    let shield = pawn_shield_mask(king_sq, color);
    (board.pieces(PieceKind::Pawn, color) & shield).count_ones() as i32 * PAWN_SHIELD_BONUS
}

fn adjacent_files(file: u8) -> Bitboard {
    let mut mask = 0;
    if file > 0 {
        mask |= file_mask(file - 1);
    }
    if file < 7 {
        mask |= file_mask(file + 1);
    }
    mask
}

fn pawn_shield_mask(king_sq: Square, color: Color) -> Bitboard {
    let files = file_mask(file_of(king_sq)) | adjacent_files(file_of(king_sq));
    let rank = rank_of(king_sq) as i8;
    let step = match color {
        Color::Light => 1,
        Color::Dark => -1,
    };

    [rank + step, rank + 2 * step]
        .into_iter()
        .filter(|r| (0..8).contains(r))
        .map(|r| files & (0xFFu64 << (r as u32 * 8)))
        .fold(0, |acc, bb| acc | bb)
}

/// Material + tapered piece-square tables + pawn structure + pawn shield.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaperedScorer;

impl TaperedScorer {
    fn white_minus_black(board: &Board) -> i32 {
        let material = MaterialScorer::material_balance_white_minus_black(board);
        let positional = tapered_positional_white_minus_black(board);
        let structure = pawn_structure(board, Color::Light) - pawn_structure(board, Color::Dark);
        let shield = king_pawn_shield(board, Color::Light) - king_pawn_shield(board, Color::Dark);
        material + positional + structure + shield
    }
}

impl BoardScorer for TaperedScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        relative(Self::white_minus_black(&game_state.board), perspective)
    }
}

/// Terminal-aware evaluation from `color`'s point of view.
///
/// Checkmate scores `-MATE_SCORE` for the mated side and `MATE_SCORE` for its
/// opponent, even once the fifty-move clock has run out; stalemate and the
/// fifty-move draw score 0.
pub fn evaluate(color: Color, game_state: &GameState) -> i32 {
    if !has_legal_move(game_state) {
        if !game_state.is_in_check() {
            return 0;
        }
        return if color == game_state.side_to_move {
            -MATE_SCORE
        } else {
            MATE_SCORE
        };
    }
    if game_state.is_draw_by_fifty_move_rule() {
        return 0;
    }
    TaperedScorer.score(game_state, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    const SAMPLE_FENS: [&str; 5] = [
        STARTING_POSITION_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ];

    #[test]
    fn starting_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(TaperedScorer.score(&game, Color::Light), 0);
        assert_eq!(evaluate(Color::Dark, &game), 0);
    }

    #[test]
    fn evaluation_is_color_symmetric() {
        for fen in SAMPLE_FENS {
            let state = GameState::from_fen(fen).expect("FEN should parse");
            let mirrored = state.mirrored();
            assert_eq!(
                evaluate(Color::Light, &state),
                evaluate(Color::Dark, &mirrored),
                "{fen}"
            );
            assert_eq!(
                TaperedScorer.score(&state, Color::Dark),
                -TaperedScorer.score(&state, Color::Light),
            );
        }
    }

    #[test]
    fn extra_queen_is_winning() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        assert!(evaluate(Color::Light, &state) > 900);
        assert!(evaluate(Color::Dark, &state) < -900);
        assert_eq!(MaterialScorer.score(&state, Color::Light), 900);
    }

    #[test]
    fn terminal_positions_short_circuit() {
        let mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(Color::Dark, &mated), -MATE_SCORE);
        assert_eq!(evaluate(Color::Light, &mated), MATE_SCORE);

        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(Color::Light, &stalemate), 0);

        let fifty = GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 100 90").expect("FEN should parse");
        assert_eq!(evaluate(Color::Light, &fifty), 0);
    }

    #[test]
    fn checkmate_outranks_fifty_move_draw() {
        let mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 80").expect("FEN should parse");
        assert!(mated.is_checkmate());
        assert_eq!(evaluate(Color::Dark, &mated), -MATE_SCORE);
        assert_eq!(evaluate(Color::Light, &mated), MATE_SCORE);
    }

    #[test]
    fn pawn_structure_penalties() {
        let state = GameState::from_fen("4k3/8/8/8/8/2P5/2P5/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            pawn_structure(&state.board, Color::Light),
            -DOUBLED_PAWN_PENALTY - 2 * ISOLATED_PAWN_PENALTY
        );
        assert_eq!(pawn_structure(&state.board, Color::Dark), 0);
    }

    #[test]
    fn castled_king_behind_pawns_gets_shield_bonus() {
        let state = GameState::from_fen("6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1").expect("FEN should parse");
        assert_eq!(king_pawn_shield(&state.board, Color::Light), 3 * PAWN_SHIELD_BONUS);
        assert_eq!(king_pawn_shield(&state.board, Color::Dark), 3 * PAWN_SHIELD_BONUS);
    }

    #[test]
    fn endgame_tables_dominate_without_pieces() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let expected_pawn = EG_VALUE[0] + EG_PAWN[12 ^ 56];
        let king_delta = EG_KING[4 ^ 56] - EG_KING[60];
        assert_eq!(
            tapered_positional_white_minus_black(&state.board),
            expected_pawn + king_delta
        );
    }
}
