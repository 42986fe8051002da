//! Move value type.

use std::fmt;

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Capture,
    EnPassant,
    Castle,
    /// Pawn reaching the back rank; may also capture.
    Promotion,
}

/// Immutable move record produced by move generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub color: Color,
    pub kind: MoveKind,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square, piece: PieceKind, color: Color, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            piece,
            color,
            kind,
            promotion: None,
        }
    }

    #[inline]
    pub const fn promotion(from: Square, to: Square, color: Color, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            piece: PieceKind::Pawn,
            color,
            kind: MoveKind::Promotion,
            promotion: Some(promotion),
        }
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle)
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Square of the piece removed by this move when it captures.
    ///
    /// En passant takes the pawn behind the destination, relative to the
    /// mover's direction.
    #[inline]
    pub fn capture_square(&self) -> Square {
        if self.is_en_passant() {
            (self.to as i8 - self.color.pawn_push_offset()) as Square
        } else {
            self.to
        }
    }

    /// Piece this move would capture on `board`, if any.
    #[inline]
    pub fn captured_piece(&self, board: &Board) -> Option<PieceKind> {
        match self.kind {
            MoveKind::EnPassant => Some(PieceKind::Pawn),
            MoveKind::Castle | MoveKind::Normal => None,
            MoveKind::Capture | MoveKind::Promotion => {
                board.piece_kind_at(self.to, self.color.opposite())
            }
        }
    }

    /// Captures and en passant, including capturing promotions.
    #[inline]
    pub fn is_capture_on(&self, board: &Board) -> bool {
        self.captured_piece(board).is_some()
    }

    /// Resolve long algebraic text (`e2e4`, `e7e8q`) against the legal moves.
    pub fn from_long_algebraic(text: &str, game_state: &GameState) -> Option<ChessMove> {
        crate::move_generation::legal_move_generator::generate_legal_moves(game_state)
            .into_iter()
            .find(|mv| mv.to_string() == text)
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            square_to_algebraic(self.from),
            square_to_algebraic(self.to)
        )?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_long_algebraic() {
        let push = ChessMove::new(12, 28, PieceKind::Pawn, Color::Light, MoveKind::Normal);
        assert_eq!(push.to_string(), "e2e4");
        let promo = ChessMove::promotion(52, 60, Color::Light, PieceKind::Queen);
        assert_eq!(promo.to_string(), "e7e8q");
    }

    #[test]
    fn en_passant_captures_behind_destination() {
        let light = ChessMove::new(36, 43, PieceKind::Pawn, Color::Light, MoveKind::EnPassant);
        assert_eq!(light.capture_square(), 35);
        let dark = ChessMove::new(27, 20, PieceKind::Pawn, Color::Dark, MoveKind::EnPassant);
        assert_eq!(dark.capture_square(), 28);
    }
}
