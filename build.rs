//! Finds rook and bishop magic multipliers and writes them as constants.

#[allow(dead_code)]
#[path = "src/moves/magic_finder.rs"]
mod magic_finder;

use std::env;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use magic_finder::{find_magic, MagicEntry, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

const MAGIC_SEED: u64 = 0x0051_5549_4E43_4521;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/moves/magic_finder.rs");

    let mut rng = StdRng::seed_from_u64(MAGIC_SEED);
    let rook = find_all("rook", &ROOK_DIRECTIONS, &mut rng)?;
    let bishop = find_all("bishop", &BISHOP_DIRECTIONS, &mut rng)?;

    let mut out = String::new();
    writeln!(out, "// Generated by build.rs.")?;
    write_table(&mut out, "ROOK", &rook)?;
    write_table(&mut out, "BISHOP", &bishop)?;

    let path = PathBuf::from(env::var("OUT_DIR")?).join("magic_numbers.rs");
    fs::write(path, out)?;
    Ok(())
}

fn find_all(
    name: &str,
    directions: &[(i32, i32); 4],
    rng: &mut StdRng,
) -> Result<Vec<MagicEntry>, Box<dyn Error>> {
    (0u8..64)
        .map(|square| {
            find_magic(square, directions, rng)
                .ok_or_else(|| -> Box<dyn Error> {
                    format!("no {name} magic found for square {square}").into()
                })
        })
        .collect()
}

fn write_table(out: &mut String, prefix: &str, entries: &[MagicEntry]) -> std::fmt::Result {
    writeln!(out, "pub const {prefix}_MAGICS: [u64; 64] = [")?;
    for entry in entries {
        writeln!(out, "    0x{:016X},", entry.magic)?;
    }
    writeln!(out, "];")?;

    writeln!(out, "pub const {prefix}_INDEX_BITS: [u32; 64] = [")?;
    for entry in entries {
        writeln!(out, "    {},", entry.index_bits)?;
    }
    writeln!(out, "];")
}
