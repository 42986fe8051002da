//! FEN-to-GameState parser.
//!
//! Builds a complete position from Forsyth-Edwards Notation. Trailing fields
//! may be omitted and default to `w - - 0 1`, so bare placements such as
//! `8/8/8/8/8/8/8/R3K2R` are accepted.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().unwrap_or("w");
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state.board)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("halfmove clock '{halfmove_part}'")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("fullmove number '{fullmove_part}'")))?;

    game_state.refresh_zobrist_key();
    Ok(game_state)
}

fn invalid(detail: &str) -> ChessErrors {
    ChessErrors::InvalidFen(detail.to_owned())
}

fn parse_board(board_part: &str, board: &mut Board) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(&format!("rank '{rank_str}' has more than 8 files")));
                }
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid(&format!("rank '{rank_str}' has more than 8 files")));
            }

            board.add_piece(square_at(file, rank), piece, color);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(&format!("rank '{rank_str}' does not cover 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(&format!("side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    castling_part.chars().try_fold(0, |rights, ch| match ch {
        'K' => Ok(rights | CASTLE_LIGHT_KINGSIDE),
        'Q' => Ok(rights | CASTLE_LIGHT_QUEENSIDE),
        'k' => Ok(rights | CASTLE_DARK_KINGSIDE),
        'q' => Ok(rights | CASTLE_DARK_QUEENSIDE),
        _ => Err(invalid(&format!("castling rights character '{ch}'"))),
    })
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(&format!("en-passant square '{en_passant_part}'")))?;
    match rank_of(square) {
        2 | 5 => Ok(Some(square)),
        _ => Err(invalid(&format!("en-passant square '{en_passant_part}' is not on rank 3 or 6"))),
    }
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else {
        Color::Dark
    };
    PieceKind::from_char(ch).map(|piece| (color, piece))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.board.occupied().count_ones(), 32);
        assert_eq!(game_state.board.piece_at(3), Some((Color::Light, PieceKind::Queen)));
        assert_eq!(game_state.board.piece_at(60), Some((Color::Dark, PieceKind::King)));
    }

    #[test]
    fn bare_placement_uses_defaults() {
        let game_state = parse_fen("8/8/8/8/8/8/8/R3K2R").expect("placement should parse");
        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.castling_rights, 0);
        assert_eq!(game_state.en_passant_square, None);
        assert_eq!(game_state.board.occupied().count_ones(), 3);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(parse_fen(""), Err(ChessErrors::InvalidFen(_))));
        assert!(parse_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w X - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - e4 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - zero 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1 extra").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/4X3 w - - 0 1").is_err());
    }
}
