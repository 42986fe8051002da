use std::panic;
use std::thread;

use log::debug;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Count leaf nodes (and leaf move categories) `depth` plies below `game_state`.
///
/// The state is walked with make/unmake and is returned unchanged.
pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        perft_recurse(game_state, mv, depth, &mut total);
    }
    total
}

/// Fork-join perft: each root move is searched on its own thread with its own
/// copy of the position, and the partial counts are summed after every thread joins.
pub fn perft_parallel(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let root_moves = generate_legal_moves(game_state);
    debug!("perft_parallel: depth {depth}, {} root moves", root_moves.len());

    let partials: Vec<PerftCounts> = thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|&mv| {
                let mut local_state = game_state.clone();
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(&mut local_state, mv, depth, &mut local);
                    local
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    });

    let mut total = PerftCounts::default();
    for partial in partials {
        total.merge(partial);
    }
    total
}

fn perft_recurse(game_state: &mut GameState, mv: ChessMove, depth: u8, counts: &mut PerftCounts) {
    if depth == 1 {
        counts.nodes += 1;
        if mv.is_capture_on(&game_state.board) {
            counts.captures += 1;
        }
        if mv.is_en_passant() {
            counts.en_passant += 1;
        }
        if mv.is_castle() {
            counts.castles += 1;
        }
        if mv.promotion.is_some() {
            counts.promotions += 1;
        }

        game_state.make_move_unchecked(mv);
        if is_king_in_check(&game_state.board, game_state.side_to_move) {
            counts.checks += 1;
        }
        game_state.unmake_move();
        return;
    }

    game_state.make_move_unchecked(mv);
    for child in generate_legal_moves(game_state) {
        perft_recurse(game_state, child, depth - 1, counts);
    }
    game_state.unmake_move();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameState::new_game();
        assert_eq!(
            perft(&mut game, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn starting_position_reference_counts() {
        let mut game = GameState::new_game();
        let before = game.clone();
        assert_eq!(perft(&mut game, 1).nodes, 20);
        assert_eq!(perft(&mut game, 2).nodes, 400);

        let depth_three = perft(&mut game, 3);
        assert_eq!(depth_three.nodes, 8_902);
        assert_eq!(depth_three.captures, 34);
        assert_eq!(depth_three.checks, 12);
        assert_eq!(game, before);
    }

    #[test]
    fn kiwipete_depth_two_categories() {
        let mut game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        let counts = perft(&mut game, 2);
        assert_eq!(counts.nodes, 2_039);
        assert_eq!(counts.captures, 351);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.castles, 91);
        assert_eq!(counts.checks, 3);
    }

    #[test]
    fn parallel_matches_single_thread() {
        let mut game = GameState::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1")
            .expect("FEN should parse");
        let parallel = perft_parallel(&game, 3);
        assert_eq!(parallel, perft(&mut game, 3));
        assert_eq!(parallel.nodes, 2_812);
    }
}
