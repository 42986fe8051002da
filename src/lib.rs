//! Crate root module declarations for the Quince Chess engine core.
//!
//! Exposes the board representation, attack tables, legal move generation,
//! evaluation and search so binaries, benches and tests can import stable
//! module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod bitboard;
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod chess_move;
    pub mod magic_finder;
    pub mod sliding_attacks;
    pub mod step_attacks;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod negamax;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
}
