use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 42;
const ROWS: usize = 100;

/// Normal sample via the Box-Muller transform.
fn gauss(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + std_dev * z
}

/// `y = 2x + 1` at `x = 0, 0.5, 1, ...`, with gaussian noise on `y`.
/// Starts with a `# x y` comment line so it loads with default options.
fn sample_matrix(rows: usize, noise: f64, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::from("# x y\n");
    for i in 0..rows {
        let x = i as f64 * 0.5;
        let y = 2.0 * x + 1.0 + gauss(&mut rng, 0.0, noise);
        let _ = writeln!(out, "{x:.3} {y:.6}");
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data.txt"));

    let text = sample_matrix(ROWS, 0.25, SEED);
    std::fs::write(&output_path, text)
        .with_context(|| format!("writing {}", output_path.display()))?;

    log::info!("sample written with seed {SEED}");
    println!("Wrote {ROWS} rows (2 columns) to {}", output_path.display());
    Ok(())
}
