//! Errors used throughout the chess engine.
//!
//! `ChessErrors` is the single error type returned by the validated game
//! operations and the position importer. Search and move generation never
//! fail: they only ever apply moves they generated themselves.
//!
//! Usage guidelines:
//! - Illegal-move variants are expected, recoverable outcomes. The position is
//!   always left exactly as it was before the rejected call.
//! - Input variants (`InvalidFen`, `InvalidAlgebraic`) carry the offending
//!   text so callers can report it.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind, Square};

pub type ChessResult<T> = Result<T, ChessErrors>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// The move belongs to the side that is not on move.
    #[error("it is not {0:?}'s turn to move")]
    WrongSideToMove(Color),

    /// The source square does not hold the piece the move claims to move.
    #[error("no {color:?} {piece:?} on square {square}")]
    NoPieceOnSquare {
        square: Square,
        piece: PieceKind,
        color: Color,
    },

    /// The destination is not among the piece's pseudo-legal targets.
    #[error("{piece:?} on {from} cannot reach {to}")]
    DestinationNotReachable {
        from: Square,
        to: Square,
        piece: PieceKind,
    },

    /// Castling rights, empty squares or attacked transit squares forbid castling.
    #[error("castling from {from} to {to} is not allowed")]
    InvalidCastling { from: Square, to: Square },

    /// The destination is not the current en-passant target.
    #[error("en passant to {0} is not available")]
    InvalidEnPassant(Square),

    /// The move is structurally valid but exposes the mover's own king.
    #[error("move from {from} to {to} leaves the king in check")]
    LeavesKingInCheck { from: Square, to: Square },

    /// `undo_move` was called with nothing to undo.
    #[error("move history is empty")]
    EmptyMoveHistory,

    /// Malformed position string.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Malformed square coordinate.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraic(String),
}
