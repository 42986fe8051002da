//! Make/unmake primitives.
//!
//! `apply_move_to_board` / `revert_move_on_board` only touch placement and
//! are used both for scratch legality probes and by the full make/unmake
//! below, which also maintains rights, clocks and the incremental hash.

use crate::game_state::chess_rules::{
    castling_lane, castling_right_for_rook_square, castling_rights_of,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::{ChessMove, MoveKind};
use crate::search::zobrist::{castling_key, en_passant_key, piece_square_key, side_to_move_key};

/// Move pieces for `mv`; returns the captured piece and the square it stood on.
pub fn apply_move_to_board(board: &mut Board, mv: ChessMove) -> Option<(PieceKind, Square)> {
    let enemy = mv.color.opposite();

    let captured = match mv.kind {
        MoveKind::EnPassant => {
            let square = mv.capture_square();
            board.remove_piece(square, PieceKind::Pawn, enemy);
            Some((PieceKind::Pawn, square))
        }
        _ => board.piece_kind_at(mv.to, enemy).map(|piece| {
            board.remove_piece(mv.to, piece, enemy);
            (piece, mv.to)
        }),
    };

    match mv.promotion {
        Some(promotion) => {
            board.remove_piece(mv.from, PieceKind::Pawn, mv.color);
            board.add_piece(mv.to, promotion, mv.color);
        }
        None => board.move_piece(mv.from, mv.to, mv.piece, mv.color),
    }

    if mv.is_castle() {
        if let Some(lane) = castling_lane(mv.color, mv.from, mv.to) {
            board.move_piece(lane.rook_from, lane.rook_to, PieceKind::Rook, mv.color);
        }
    }

    captured
}

/// Exact inverse of `apply_move_to_board`.
pub fn revert_move_on_board(board: &mut Board, mv: ChessMove, captured: Option<(PieceKind, Square)>) {
    if mv.is_castle() {
        if let Some(lane) = castling_lane(mv.color, mv.from, mv.to) {
            board.move_piece(lane.rook_to, lane.rook_from, PieceKind::Rook, mv.color);
        }
    }

    match mv.promotion {
        Some(promotion) => {
            board.remove_piece(mv.to, promotion, mv.color);
            board.add_piece(mv.from, PieceKind::Pawn, mv.color);
        }
        None => board.move_piece(mv.to, mv.from, mv.piece, mv.color),
    }

    if let Some((piece, square)) = captured {
        board.add_piece(square, piece, mv.color.opposite());
    }
}

/// Apply a generated move and push its undo record. No legality checks.
pub(crate) fn make_move_in_place(game_state: &mut GameState, mv: ChessMove) {
    let color = mv.color;
    let enemy = color.opposite();

    let mut record = ReversibleMove {
        mv,
        prev_side_to_move: game_state.side_to_move,
        captured: None,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_zobrist_key: game_state.zobrist_key,
    };

    let mut key = game_state.zobrist_key;
    key ^= castling_key(game_state.castling_rights);
    key ^= en_passant_key(game_state.en_passant_square);

    let captured = apply_move_to_board(&mut game_state.board, mv);
    record.captured = captured;

    key ^= piece_square_key(color, mv.piece, mv.from);
    key ^= piece_square_key(color, mv.promotion.unwrap_or(mv.piece), mv.to);
    if let Some((piece, square)) = captured {
        key ^= piece_square_key(enemy, piece, square);
    }
    if mv.is_castle() {
        if let Some(lane) = castling_lane(color, mv.from, mv.to) {
            key ^= piece_square_key(color, PieceKind::Rook, lane.rook_from);
            key ^= piece_square_key(color, PieceKind::Rook, lane.rook_to);
        }
    }

    let mut rights = game_state.castling_rights;
    match mv.piece {
        PieceKind::King => rights &= !castling_rights_of(color),
        PieceKind::Rook => rights &= !castling_right_for_rook_square(color, mv.from),
        _ => {}
    }
    if let Some((PieceKind::Rook, square)) = captured {
        rights &= !castling_right_for_rook_square(enemy, square);
    }
    game_state.castling_rights = rights;

    game_state.en_passant_square = if mv.piece == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 16 {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    key ^= castling_key(game_state.castling_rights);
    key ^= en_passant_key(game_state.en_passant_square);

    if mv.piece == PieceKind::Pawn || captured.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = enemy;
    key ^= side_to_move_key();
    game_state.zobrist_key = key;

    game_state.history.push(record);
}

/// Pop the last undo record and restore the position it describes.
pub(crate) fn unmake_move_in_place(game_state: &mut GameState) -> Option<ChessMove> {
    let record = game_state.history.pop()?;

    revert_move_on_board(&mut game_state.board, record.mv, record.captured);

    game_state.side_to_move = record.prev_side_to_move;
    game_state.castling_rights = record.prev_castling_rights;
    game_state.en_passant_square = record.prev_en_passant_square;
    game_state.halfmove_clock = record.prev_halfmove_clock;
    game_state.fullmove_number = record.prev_fullmove_number;
    game_state.zobrist_key = record.prev_zobrist_key;

    Some(record.mv)
}
