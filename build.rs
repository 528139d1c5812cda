//! Offline magic-number generation.
//!
//! Runs the seeded magic search for bishops and rooks and writes the
//! multipliers and index widths to `$OUT_DIR/magic_numbers.rs`. An exhausted
//! search panics here, so a table that cannot be proven collision-free never
//! reaches the library.

#[allow(dead_code)]
#[path = "src/moves/magic_search.rs"]
mod magic_search;

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use magic_search::{find_all_magics, MagicSearchConfig, Slider};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/moves/magic_search.rs");

    let config = MagicSearchConfig::default();
    let mut out = String::new();
    out.push_str("// Generated by build.rs from the seeded magic search. Do not edit.\n\n");

    for (const_name, slider) in [("BISHOP_MAGICS", Slider::Bishop), ("ROOK_MAGICS", Slider::Rook)] {
        let entries = match find_all_magics(slider, &config) {
            Ok(entries) => entries,
            Err(err) => panic!("magic table generation failed: {err}"),
        };

        writeln!(out, "pub const {const_name}: [(u64, u32); 64] = [")
            .expect("writing to a String cannot fail");
        for entry in entries.iter() {
            writeln!(out, "    (0x{:016X}, {}),", entry.magic, entry.bits)
                .expect("writing to a String cannot fail");
        }
        out.push_str("];\n\n");
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest = Path::new(&out_dir).join("magic_numbers.rs");
    fs::write(&dest, out).expect("failed to write generated magic numbers");
}
