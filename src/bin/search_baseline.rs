//! Fixed-depth search baseline runner.
//!
//! Usage:
//! `cargo run --release --bin search_baseline`
//! `RUST_LOG=debug cargo run --release --bin search_baseline -- --depth 5`

use quince_chess::chess_errors::ChessResult;
use quince_chess::moves::sliding_attacks::init_attack_tables;
use quince_chess::search::negamax::{search_with_tt, SearchConfig};
use quince_chess::search::transposition_table::TranspositionTable;
use quince_chess::utils::fen_parser::parse_fen;

const SUITE: [(&str, &str); 4] = [
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "classical_mid",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
    ),
    (
        "tactical",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("end_kpk", "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1"),
];

fn parse_arg_u8(flag: &str, default: u8) -> u8 {
    let args: Vec<String> = std::env::args().collect();
    args.windows(2)
        .find(|pair| pair[0] == flag)
        .and_then(|pair| pair[1].parse::<u8>().ok())
        .map_or(default, |v| v.max(1))
}

fn run_case(name: &str, fen: &str, config: SearchConfig) -> ChessResult<()> {
    let mut game = parse_fen(fen)?;
    let mut tt = TranspositionTable::new_with_mb(config.tt_size_mb);
    let result = search_with_tt(&mut game, config, &mut tt);

    let best_move = result
        .best_move
        .map_or_else(|| "none".to_string(), |mv| mv.to_string());
    let elapsed_ms = result.elapsed.as_millis().max(1);
    println!(
        "{name}: depth={} nodes={} elapsed_ms={} nps={} score={} best_move={} tt_hits={}/{}",
        config.max_depth,
        result.nodes,
        result.elapsed.as_millis(),
        u128::from(result.nodes) * 1000 / elapsed_ms,
        result.score,
        best_move,
        result.tt_stats.hits,
        result.tt_stats.probes,
    );
    Ok(())
}

fn main() -> ChessResult<()> {
    env_logger::init();
    init_attack_tables();

    let config = SearchConfig {
        max_depth: parse_arg_u8("--depth", 4),
        tt_size_mb: 64,
        ..SearchConfig::default()
    };
    println!("search baseline run: depth={}", config.max_depth);
    for (name, fen) in SUITE {
        run_case(name, fen, config)?;
    }
    Ok(())
}
