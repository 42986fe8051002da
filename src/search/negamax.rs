//! Fixed-depth negamax alpha-beta search with a transposition table and a
//! SEE-pruned quiescence extension.
//!
//! The position is searched in place with make/unmake and is handed back
//! unchanged. The transposition table is passed in by the caller so it can be
//! reused across searches.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::{generate_legal_captures, generate_legal_moves};
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{BoardScorer, TaperedScorer, MATE_SCORE};
use crate::search::move_ordering::{order_moves, see};
use crate::search::transposition_table::{NodeType, TTStats, TranspositionTable};

/// Bound of the root window; wider than any reachable score.
pub const INFINITY: i32 = 10_000_000;

/// Scores at or beyond this magnitude encode a forced mate.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - 1_000;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Captures searched past the horizon before standing pat unconditionally.
    pub quiescence_max_ply: u8,
    pub tt_size_mb: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            quiescence_max_ply: 8,
            tt_size_mb: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub tt_stats: TTStats,
}

/// Mate scores are stored relative to the node, not the root.
#[inline]
fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score + i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score - i32::from(ply)
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score >= MATE_THRESHOLD {
        score - i32::from(ply)
    } else if score <= -MATE_THRESHOLD {
        score + i32::from(ply)
    } else {
        score
    }
}

/// Search context: the shared table, the static evaluator and node counting.
pub struct Searcher<'a, S: BoardScorer> {
    tt: &'a mut TranspositionTable,
    scorer: &'a S,
    config: SearchConfig,
    nodes: u64,
}

impl<'a, S: BoardScorer> Searcher<'a, S> {
    pub fn new(tt: &'a mut TranspositionTable, scorer: &'a S, config: SearchConfig) -> Self {
        Self {
            tt,
            scorer,
            config,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Score of `game_state` for `color` (the side to move) and the move that
    /// achieves it, searched `depth` plies deep inside `(alpha, beta)`.
    ///
    /// `ply` is the distance from the root; it shortens mate scores so nearer
    /// mates are preferred.
    pub fn negamax(
        &mut self,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        color: Color,
        game_state: &mut GameState,
        ply: u8,
    ) -> (i32, Option<ChessMove>) {
        self.nodes += 1;
        let key = game_state.zobrist_key;
        let alpha_orig = alpha;

        if let Some(hit) = self.tt.probe(key, i16::from(depth)) {
            let score = score_from_tt(hit.score, ply);
            match hit.node_type {
                NodeType::Exact => return (score, hit.best_move),
                NodeType::LowerBound if score >= beta => return (beta, hit.best_move),
                NodeType::UpperBound if score <= alpha => return (alpha, hit.best_move),
                _ => {}
            }
        }

        let moves = generate_legal_moves(game_state);
        if moves.is_empty() {
            let score = if game_state.is_in_check() {
                -(MATE_SCORE - i32::from(ply))
            } else {
                0
            };
            return (score, None);
        }
        if game_state.is_draw_by_fifty_move_rule() {
            return (0, None);
        }

        if depth == 0 {
            return (self.quiescence(alpha, beta, color, game_state, 0), None);
        }

        let mut moves = order_moves(moves, game_state);
        if let Some(tt_move) = self.tt.probe_move(key) {
            if let Some(idx) = moves.iter().position(|&mv| mv == tt_move) {
                moves[..=idx].rotate_right(1);
            }
        }

        let mut best_score = -INFINITY;
        let mut best_move = None;

        for mv in moves {
            game_state.make_move_unchecked(mv);
            let (child, _) =
                self.negamax(depth - 1, -beta, -alpha, color.opposite(), game_state, ply + 1);
            game_state.unmake_move();

            let score = -child;
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        let node_type = if best_score <= alpha_orig {
            NodeType::UpperBound
        } else if best_score >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        };
        self.tt.store(
            key,
            i16::from(depth),
            score_to_tt(best_score, ply),
            node_type,
            best_move,
        );

        (best_score, best_move)
    }

    /// Capture-only search past the horizon, fail-hard around `(alpha, beta)`.
    ///
    /// Captures that lose material by static exchange are skipped; `ply`
    /// counts plies below the horizon and is capped by
    /// `SearchConfig::quiescence_max_ply`.
    pub fn quiescence(
        &mut self,
        mut alpha: i32,
        beta: i32,
        color: Color,
        game_state: &mut GameState,
        ply: u8,
    ) -> i32 {
        self.nodes += 1;

        let stand_pat = self.scorer.score(game_state, color);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if ply >= self.config.quiescence_max_ply {
            return alpha;
        }

        let captures = order_moves(generate_legal_captures(game_state), game_state);
        for mv in captures {
            if see(game_state, mv) < 0 {
                continue;
            }

            game_state.make_move_unchecked(mv);
            let score = -self.quiescence(-beta, -alpha, color.opposite(), game_state, ply + 1);
            game_state.unmake_move();

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

/// Best move for `color` searched to `depth` plies, or `None` when there is
/// no legal move, the position is drawn, or `color` is not on move.
pub fn find_best_move(
    depth: u8,
    color: Color,
    game_state: &mut GameState,
    tt: &mut TranspositionTable,
) -> Option<ChessMove> {
    if color != game_state.side_to_move {
        warn!("find_best_move: {color:?} is not on move");
        return None;
    }

    let config = SearchConfig {
        max_depth: depth,
        ..SearchConfig::default()
    };
    let mut searcher = Searcher::new(tt, &TaperedScorer, config);
    let (_, best_move) = searcher.negamax(depth, -INFINITY, INFINITY, color, game_state, 0);
    best_move
}

/// Full-window search of the side to move to `config.max_depth`.
pub fn search_with_tt(
    game_state: &mut GameState,
    config: SearchConfig,
    tt: &mut TranspositionTable,
) -> SearchResult {
    let started = Instant::now();
    let color = game_state.side_to_move;

    let mut searcher = Searcher::new(tt, &TaperedScorer, config);
    let (score, best_move) =
        searcher.negamax(config.max_depth, -INFINITY, INFINITY, color, game_state, 0);
    let nodes = searcher.nodes();

    let result = SearchResult {
        best_move,
        score,
        nodes,
        elapsed: started.elapsed(),
        tt_stats: tt.stats(),
    };
    debug!(
        "search depth {}: best {:?} score {} nodes {} in {:?}",
        config.max_depth,
        result.best_move.map(|mv| mv.to_string()),
        result.score,
        result.nodes,
        result.elapsed
    );
    result
}

/// `search_with_tt` with a fresh table sized by `config.tt_size_mb`.
pub fn search(game_state: &mut GameState, config: SearchConfig) -> SearchResult {
    let mut tt = TranspositionTable::new_with_mb(config.tt_size_mb);
    search_with_tt(game_state, config, &mut tt)
}
