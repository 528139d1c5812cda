//! Offline magic-number improvement.
//!
//! Spends a larger trial budget than the build does and reports, per square,
//! the narrowest collision-free index width found next to the build default.
//!
//! Usage:
//! `cargo run --release --bin improve_magics -- --trials 200000 --seed 7`

use chrono::Utc;

use chess_core::moves::magic_search::{
    find_all_magics, min_index_bits, relevant_mask, verify_magic, MagicSearchConfig, Slider,
};
use chess_core::moves::magic_tables::{bishop_table, rook_table};

fn parse_arg_u64(flag: &str, default: u64) -> u64 {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u64>() {
                return v;
            }
        }
    }
    default
}

fn main() -> Result<(), String> {
    let defaults = MagicSearchConfig::default();
    let config = MagicSearchConfig {
        seed: parse_arg_u64("--seed", defaults.seed),
        trials_per_width: u32::try_from(parse_arg_u64("--trials", 200_000))
            .map_err(|e| e.to_string())?,
        ..defaults
    };

    println!(
        "info string improve_magics started {} seed {:#x} trials_per_width {}",
        Utc::now().to_rfc3339(),
        config.seed,
        config.trials_per_width
    );

    for (slider, built_len) in [
        (Slider::Bishop, bishop_table().len()),
        (Slider::Rook, rook_table().len()),
    ] {
        let started = Utc::now();
        let entries = find_all_magics(slider, &config).map_err(|e| e.to_string())?;
        let elapsed_ms = (Utc::now() - started).num_milliseconds().max(0);

        let mut improved_len = 0usize;
        for (square, entry) in entries.iter().enumerate() {
            let square = square as u8;
            if !verify_magic(slider, square, *entry) {
                return Err(format!("{} square {square}: magic failed verification", slider.name()));
            }
            improved_len += 1usize << entry.bits;
            println!(
                "{} square {:2} floor {:2} full {:2} found {:2} magic 0x{:016X}",
                slider.name(),
                square,
                min_index_bits(slider, square),
                relevant_mask(slider, square).count_ones(),
                entry.bits,
                entry.magic
            );
        }
        println!(
            "{} table entries: build {} improved {} time_ms {}",
            slider.name(),
            built_len,
            improved_len,
            elapsed_ms
        );
    }

    Ok(())
}
