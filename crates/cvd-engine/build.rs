use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Display gamma, kept in sync with `GAMMA` in src/color/gamma.rs
const GAMMA: f64 = 2.2;

/// Power-law decode: 8-bit encoded sample to linear light
fn decode_exact(sample: u32) -> f64 {
    (sample as f64 / 255.0).powf(GAMMA)
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("gamma_lut.rs");
    let mut file = File::create(&dest_path).unwrap();

    // Generate DECODE LUT (256 entries, one per 8-bit sample).
    // `{:?}` prints the shortest literal that round-trips, so the table is
    // bit-identical to evaluating the formula at runtime.
    writeln!(file, "/// Lookup table for 8-bit encoded to linear conversion").unwrap();
    writeln!(file, "/// Index: encoded sample, Value: (sample / 255)^{GAMMA:?}").unwrap();
    writeln!(file, "pub(crate) static DECODE: [f64; 256] = [").unwrap();
    for i in 0..256 {
        if i > 0 && i % 4 == 0 {
            writeln!(file).unwrap();
        }
        write!(file, "    {:?},", decode_exact(i)).unwrap();
    }
    writeln!(file, "\n];").unwrap();

    // Rerun if build.rs changes
    println!("cargo::rerun-if-changed=build.rs");
}
