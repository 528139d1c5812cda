//! Perft runner.
//!
//! Usage:
//! `cargo run --release --bin perft`
//! `cargo run --release --bin perft -- --depth 5 --fen "<fen>"`
//! `cargo run --release --bin perft -- --depth 3 --divide`

use chrono::Utc;

use chess_core::game_state::chess_rules::STARTING_POSITION_FEN;
use chess_core::move_generation::legal_move_generator::LegalMoveGenerator;
use chess_core::move_generation::perft::{perft, perft_divide, perft_nodes};
use chess_core::utils::fen_parser::parse_fen;
use chess_core::utils::long_algebraic::move_to_long_algebraic;
use chess_core::utils::render_game_state::render_position;

fn parse_arg_u8(flag: &str, default: u8) -> u8 {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u8>() {
                return v;
            }
        }
    }
    default
}

fn parse_arg_string(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn has_flag(flag: &str) -> bool {
    std::env::args().any(|arg| arg == flag)
}

fn main() -> Result<(), String> {
    let depth = parse_arg_u8("--depth", 4);
    let fen = parse_arg_string("--fen").unwrap_or_else(|| STARTING_POSITION_FEN.to_owned());
    let mut position = parse_fen(&fen)?;

    println!("info string perft started {}", Utc::now().to_rfc3339());
    println!("{}", render_position(&position));
    println!("fen {fen}");

    if has_flag("--divide") {
        let started = Utc::now();
        let divide = perft_divide(&mut position, depth).map_err(|e| e.to_string())?;
        let mut total = 0u64;
        for (mv, nodes) in divide {
            println!("{}: {nodes}", move_to_long_algebraic(&position, mv)?);
            total += nodes;
        }
        let elapsed_ms = (Utc::now() - started).num_milliseconds().max(0) as u64;
        println!("total {total} time_ms {elapsed_ms}");
        return Ok(());
    }

    for d in 1..=depth {
        let started = Utc::now();
        let nodes = perft_nodes(&mut position, d).map_err(|e| e.to_string())?;
        let elapsed_ms = (Utc::now() - started).num_milliseconds().max(0) as u64;
        let nps = if elapsed_ms == 0 {
            nodes
        } else {
            nodes * 1000 / elapsed_ms
        };
        println!("depth {d} nodes {nodes} time_ms {elapsed_ms} nps {nps}");
    }

    if has_flag("--stats") {
        let stats_depth = depth.min(4);
        let counts = perft(&LegalMoveGenerator, &mut position, stats_depth)
            .map_err(|e| e.to_string())?;
        println!(
            "depth {stats_depth} captures {} en_passant {} castles {} promotions {} checks {} checkmates {}",
            counts.captures,
            counts.en_passant,
            counts.castles,
            counts.promotions,
            counts.checks,
            counts.checkmates
        );
    }

    Ok(())
}
