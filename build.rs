/* embcordic | build.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Generates the default CORDIC tables
 *
 * The iteration count and the fixed-point format can be changed with the
 * EMBCORDIC_ITERATIONS and EMBCORDIC_FORMAT environment variables.
 */

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[allow(dead_code)]
#[path = "src/error.rs"]
mod error;

#[allow(dead_code)]
#[path = "src/format.rs"]
mod format;

#[allow(dead_code)]
#[path = "src/precompute.rs"]
mod precompute;

use precompute::CordicConfig;

const DEFAULT_ITERATIONS: i64 = 16;
const DEFAULT_FORMAT: &str = "2.30";

fn read_config() -> CordicConfig {
    println!("cargo:rerun-if-env-changed=EMBCORDIC_ITERATIONS");
    println!("cargo:rerun-if-env-changed=EMBCORDIC_FORMAT");

    let iterations = match env::var("EMBCORDIC_ITERATIONS") {
        Ok(value) => value
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("EMBCORDIC_ITERATIONS={value:?}: {e}")),
        Err(_) => DEFAULT_ITERATIONS
    };
    let format = env::var("EMBCORDIC_FORMAT").unwrap_or_else(|_| DEFAULT_FORMAT.into());

    CordicConfig::parse(iterations, format.trim())
        .unwrap_or_else(|e| panic!("invalid CORDIC configuration ({iterations} iterations, format {format:?}): {e}"))
}

fn main() {
    let config = read_config();
    let format = config.format();
    let width = config.storage_width();

    // Values are stored as registers of the storage width, the same way the
    // rotation engine stores them
    let atan_table: Vec<i128> = precompute::atan_table(&config).map(|v| width.wrap(v)).collect();
    let cos_k1_real = precompute::gain_real(config.iterations());
    let cos_k1 = width.wrap(precompute::gain(&config));

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("cordic_tables.rs");
    let mut f = File::create(dest_path).unwrap();

    writeln!(&mut f, "/// Number of CORDIC iterations").unwrap();
    writeln!(&mut f, "pub const ITERATIONS: usize = {};", config.iterations()).unwrap();
    writeln!(&mut f, "/// Number of integer bits of the fixed-point format").unwrap();
    writeln!(&mut f, "pub const WHOLE_BITS: u32 = {};", format.whole_bits()).unwrap();
    writeln!(&mut f, "/// Number of fractional bits of the fixed-point format").unwrap();
    writeln!(&mut f, "pub const FRACTIONAL_BITS: u32 = {};", format.fractional_bits()).unwrap();
    writeln!(&mut f, "/// `2^FRACTIONAL_BITS`").unwrap();
    writeln!(&mut f, "pub const SCALING_FACTOR: u128 = {}; // (1 << {})", format.scaling_factor(), format.fractional_bits()).unwrap();
    writeln!(&mut f, "/// Register type of the {format} format").unwrap();
    writeln!(&mut f, "pub type Fixed = {};", width.rust_type()).unwrap();
    writeln!(&mut f, "/// CORDIC gain, {cos_k1_real} scaled by `SCALING_FACTOR`").unwrap();
    writeln!(&mut f, "pub const COS_K1: Fixed = {cos_k1};").unwrap();
    writeln!(&mut f, "/// `atan(2^-i)` scaled by `SCALING_FACTOR`").unwrap();
    writeln!(&mut f, "pub const ATAN_TABLE: [Fixed; ITERATIONS] = {:?};", atan_table).unwrap();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/error.rs");
    println!("cargo:rerun-if-changed=src/format.rs");
    println!("cargo:rerun-if-changed=src/precompute.rs");
}
