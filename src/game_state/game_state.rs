//! Mutable position with a reversible move history.
//!
//! `GameState` owns the board, side to move, castling rights, en-passant
//! target, clocks and the incremental Zobrist key. It is mutated only by
//! making and undoing moves; each make pushes a `ReversibleMove`, each undo
//! pops one, so undo is O(1) and restores every field exactly.

use log::trace;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{castling_lane, FIFTY_MOVE_HALFMOVES};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    generate_legal_moves, generate_pseudo_legal_moves, has_legal_move,
};
use crate::moves::chess_move::{ChessMove, MoveKind};
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    /// Always equal to `compute_zobrist_key(self)`.
    pub zobrist_key: u64,

    pub history: Vec<ReversibleMove>,
}

impl Default for GameState {
    fn default() -> Self {
        let mut state = Self {
            board: Board::empty_board(),
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
            history: Vec::new(),
        };
        state.refresh_zobrist_key();
        state
    }
}

impl GameState {
    /// Empty board, light to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut state = Self::default();
        for (file, &piece) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            state.board.add_piece(square_at(file, 0), piece, Color::Light);
            state.board.add_piece(square_at(file, 1), PieceKind::Pawn, Color::Light);
            state.board.add_piece(square_at(file, 6), PieceKind::Pawn, Color::Dark);
            state.board.add_piece(square_at(file, 7), piece, Color::Dark);
        }
        state.castling_rights = CASTLE_ALL;
        state.refresh_zobrist_key();
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Recompute the hash from scratch after direct field edits.
    #[inline]
    pub fn refresh_zobrist_key(&mut self) {
        self.zobrist_key = compute_zobrist_key(self);
    }

    #[inline]
    pub fn legal_moves(&self) -> Vec<ChessMove> {
        generate_legal_moves(self)
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(&self.board, self.side_to_move)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && !has_legal_move(self)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !has_legal_move(self)
    }

    #[inline]
    pub fn is_draw_by_fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    pub fn is_game_over(&self) -> bool {
        self.is_draw_by_fifty_move_rule() || !has_legal_move(self)
    }

    /// Validate and apply `mv`.
    ///
    /// The move is matched against the pseudo-legal moves of the side to move
    /// by squares, piece and promotion; its `kind` is taken from the match.
    /// On any error the position is left untouched.
    pub fn make_move(&mut self, mv: ChessMove) -> ChessResult<()> {
        let result = self.validate_move(mv);
        match result {
            Ok(generated) => {
                make_move_in_place(self, generated);
                if is_king_in_check(&self.board, generated.color) {
                    unmake_move_in_place(self);
                    trace!("rejected {mv}: leaves king in check");
                    return Err(ChessErrors::LeavesKingInCheck {
                        from: mv.from,
                        to: mv.to,
                    });
                }
                Ok(())
            }
            Err(err) => {
                trace!("rejected {mv}: {err}");
                Err(err)
            }
        }
    }

    /// Resolve long algebraic text against the legal moves and make it.
    pub fn make_long_algebraic(&mut self, text: &str) -> ChessResult<ChessMove> {
        let mv = ChessMove::from_long_algebraic(text, self)
            .ok_or_else(|| ChessErrors::InvalidAlgebraic(text.to_owned()))?;
        self.make_move(mv)?;
        Ok(mv)
    }

    /// Undo the most recent move and return it.
    pub fn undo_move(&mut self) -> ChessResult<ChessMove> {
        unmake_move_in_place(self).ok_or(ChessErrors::EmptyMoveHistory)
    }

    /// Apply a move produced by move generation for this position.
    #[inline]
    pub(crate) fn make_move_unchecked(&mut self, mv: ChessMove) {
        make_move_in_place(self, mv);
    }

    #[inline]
    pub(crate) fn unmake_move(&mut self) -> Option<ChessMove> {
        unmake_move_in_place(self)
    }

    /// Color-swapped, vertically flipped copy with an empty history.
    pub fn mirrored(&self) -> Self {
        let mut state = Self {
            board: self.board.mirrored(),
            side_to_move: self.side_to_move.opposite(),
            castling_rights: mirror_castling_rights(self.castling_rights),
            en_passant_square: self.en_passant_square.map(flip_vertical),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            zobrist_key: 0,
            history: Vec::new(),
        };
        state.refresh_zobrist_key();
        state
    }

    fn validate_move(&self, mv: ChessMove) -> ChessResult<ChessMove> {
        if mv.color != self.side_to_move {
            return Err(ChessErrors::WrongSideToMove(mv.color));
        }

        if self.board.piece_kind_at(mv.from, mv.color) != Some(mv.piece) {
            return Err(ChessErrors::NoPieceOnSquare {
                square: mv.from,
                piece: mv.piece,
                color: mv.color,
            });
        }

        let generated = generate_pseudo_legal_moves(self).into_iter().find(|candidate| {
            candidate.from == mv.from
                && candidate.to == mv.to
                && candidate.piece == mv.piece
                && candidate.promotion == mv.promotion
        });
        if let Some(generated) = generated {
            return Ok(generated);
        }

        if mv.piece == PieceKind::King && castling_lane(mv.color, mv.from, mv.to).is_some() {
            return Err(ChessErrors::InvalidCastling {
                from: mv.from,
                to: mv.to,
            });
        }

        let diagonal_pawn_step = mv.piece == PieceKind::Pawn && file_of(mv.from) != file_of(mv.to);
        if mv.kind == MoveKind::EnPassant
            || (diagonal_pawn_step && !self.board.is_occupied(mv.to))
        {
            return Err(ChessErrors::InvalidEnPassant(mv.to));
        }

        Err(ChessErrors::DestinationNotReachable {
            from: mv.from,
            to: mv.to,
            piece: mv.piece,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn new_game_matches_starting_fen() {
        let game = GameState::new_game();
        let parsed = GameState::from_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(game, parsed);
        assert_eq!(game.to_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn make_then_undo_restores_every_field() {
        let fens = [
            STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in fens {
            let mut state = GameState::from_fen(fen).expect("FEN should parse");
            let before = state.clone();
            for mv in state.legal_moves() {
                state.make_move(mv).expect("generated move is legal");
                assert_eq!(state.zobrist_key, compute_zobrist_key(&state), "{fen}: {mv}");
                assert_eq!(state.undo_move(), Ok(mv));
                assert_eq!(state, before, "{fen}: {mv}");
            }
        }
    }

    #[test]
    fn wrong_side_is_rejected() {
        let mut state = GameState::new_game();
        let mv = ChessMove::new(52, 36, PieceKind::Pawn, Color::Dark, MoveKind::Normal);
        assert_eq!(state.make_move(mv), Err(ChessErrors::WrongSideToMove(Color::Dark)));
    }

    #[test]
    fn missing_piece_is_rejected() {
        let mut state = GameState::new_game();
        let mv = ChessMove::new(28, 36, PieceKind::Pawn, Color::Light, MoveKind::Normal);
        assert!(matches!(state.make_move(mv), Err(ChessErrors::NoPieceOnSquare { .. })));
    }

    #[test]
    fn unreachable_destination_is_rejected() {
        let mut state = GameState::new_game();
        let before = state.clone();
        let mv = ChessMove::new(1, 11, PieceKind::Knight, Color::Light, MoveKind::Normal);
        assert!(matches!(
            state.make_move(mv),
            Err(ChessErrors::DestinationNotReachable { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn castling_without_rights_is_rejected() {
        let mut state =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1").expect("FEN should parse");
        let mv = ChessMove::new(4, 6, PieceKind::King, Color::Light, MoveKind::Castle);
        assert_eq!(state.make_move(mv), Err(ChessErrors::InvalidCastling { from: 4, to: 6 }));
    }

    #[test]
    fn stale_en_passant_is_rejected() {
        let mut state =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2").expect("FEN should parse");
        let mv = ChessMove::new(36, 43, PieceKind::Pawn, Color::Light, MoveKind::EnPassant);
        assert_eq!(state.make_move(mv), Err(ChessErrors::InvalidEnPassant(43)));
    }

    #[test]
    fn self_check_is_rejected_and_rolled_back() {
        let mut state =
            GameState::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let before = state.clone();
        let mv = ChessMove::new(12, 29, PieceKind::Knight, Color::Light, MoveKind::Normal);
        assert_eq!(
            state.make_move(mv),
            Err(ChessErrors::LeavesKingInCheck { from: 12, to: 29 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn undo_on_fresh_game_is_an_error() {
        let mut state = GameState::new_game();
        assert_eq!(state.undo_move(), Err(ChessErrors::EmptyMoveHistory));
    }

    #[test]
    fn status_queries() {
        let mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert!(mated.is_checkmate());
        assert!(mated.is_game_over());

        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_checkmate());

        let fifty = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 100 80").expect("FEN should parse");
        assert!(fifty.is_draw_by_fifty_move_rule());
        assert!(fifty.is_game_over());
        assert!(!GameState::new_game().is_game_over());
    }

    #[test]
    fn fullmove_number_advances_after_dark_moves() {
        let mut state = GameState::new_game();
        state.make_long_algebraic("e2e4").expect("legal");
        assert_eq!(state.fullmove_number, 1);
        state.make_long_algebraic("e7e5").expect("legal");
        assert_eq!(state.fullmove_number, 2);
        assert_eq!(state.halfmove_clock, 0);
        state.make_long_algebraic("g1f3").expect("legal");
        assert_eq!(state.halfmove_clock, 1);
    }

    #[test]
    fn mirrored_twice_is_identity() {
        let state = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b Kq e3 0 1",
        )
        .expect("FEN should parse");
        let mirrored = state.mirrored();
        assert_eq!(mirrored.side_to_move, Color::Light);
        assert_eq!(mirrored.en_passant_square, Some(44));
        assert_eq!(mirrored.mirrored(), state);
    }
}
