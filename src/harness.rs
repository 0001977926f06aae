//! Benchmark harness: reference vs tiled over a sweep of tile sizes.
//!
//! Operands come from a fixed-seed RNG so every run multiplies the same
//! matrices. Only the multiplication call is timed.

use std::fmt;
use std::time::Instant;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::blocked::TileShape;
use crate::blocked::tiled::matmul_tiled;
use crate::error::{MatmulError, Result};
use crate::matrix::divergence::max_abs_diff;
use crate::matrix::reference::matmul_reference;
use crate::matrix::{Dims, Matrix};

/// Fixed benchmark parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub dims: Dims,
    pub seed: u64,
    /// Tile size reported on its own line, right after the reference.
    pub primary_tile: usize,
    /// Tile sizes swept in order after the primary run.
    pub tile_sizes: Vec<usize>,
}

impl Default for BenchConfig {
    /// A is 640×320, B is 320×640, tile 32, sweep {8, 16, 32, 64}.
    fn default() -> Self {
        BenchConfig {
            dims: Dims::new(640, 320, 640),
            seed: 123,
            primary_tile: 32,
            tile_sizes: vec![8, 16, 32, 64],
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        let Dims { m, k, n } = self.dims;
        if m == 0 || k == 0 || n == 0 {
            return Err(MatmulError::EmptyDims { m, k, n });
        }
        if self.primary_tile == 0 || self.tile_sizes.contains(&0) {
            return Err(MatmulError::EmptyTile);
        }
        Ok(())
    }
}

/// Timing and accuracy of one tiled run.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRun {
    pub tile: TileShape,
    pub elapsed_ms: f64,
    /// Max abs difference from the reference result.
    pub divergence: f32,
    pub gflops: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub dims: Dims,
    pub reference_ms: f64,
    pub reference_gflops: f64,
    pub primary: TileRun,
    pub sweep: Vec<TileRun>,
}

/// Run `f` and return its result with the wall time in milliseconds.
pub fn time_ms<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64() * 1000.0)
}

fn gflops(dims: Dims, elapsed_ms: f64) -> f64 {
    if elapsed_ms <= 0.0 {
        return 0.0;
    }
    dims.flops() / (elapsed_ms / 1000.0) / 1e9
}

/// Generate A then B from one RNG seeded with `seed`.
pub fn make_operands(dims: Dims, seed: u64) -> (Matrix, Matrix) {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = Matrix::random(dims.m, dims.k, &mut rng);
    let b = Matrix::random(dims.k, dims.n, &mut rng);
    (a, b)
}

fn run_tile(a: &Matrix, b: &Matrix, c_ref: &Matrix, tile: TileShape) -> TileRun {
    let dims = Dims::of(a, b);
    let (c, elapsed_ms) = time_ms(|| matmul_tiled(a, b, tile));
    let divergence = max_abs_diff(c_ref, &c);

    debug!(
        "tile {}: {} blocks, {:.3} ms, diff={:e}",
        tile,
        tile.block_count(dims),
        elapsed_ms,
        divergence
    );

    TileRun {
        tile,
        elapsed_ms,
        divergence,
        gflops: gflops(dims, elapsed_ms),
    }
}

/// Time the reference once, then the primary tile size, then every tile
/// size of the sweep, all with cubic tiles.
///
/// # Errors
///
/// Returns an error if `config` fails [`BenchConfig::validate`].
pub fn run_benchmark(config: &BenchConfig) -> Result<BenchReport> {
    config.validate()?;
    let dims = config.dims;

    debug!(
        "generating A {}x{} and B {}x{} (seed {})",
        dims.m, dims.k, dims.k, dims.n, config.seed
    );
    let (a, b) = make_operands(dims, config.seed);

    let (c_ref, reference_ms) = time_ms(|| matmul_reference(&a, &b));
    info!("reference: {:.3} ms", reference_ms);

    let primary = run_tile(&a, &b, &c_ref, TileShape::cubic(config.primary_tile));
    let sweep = config
        .tile_sizes
        .iter()
        .map(|&size| run_tile(&a, &b, &c_ref, TileShape::cubic(size)))
        .collect::<Vec<_>>();

    let worst = sweep
        .iter()
        .chain(std::iter::once(&primary))
        .map(|run| run.divergence)
        .fold(0.0f32, f32::max);
    info!("{} tiled runs, worst divergence {:e}", sweep.len() + 1, worst);

    Ok(BenchReport {
        dims,
        reference_ms,
        reference_gflops: gflops(dims, reference_ms),
        primary,
        sweep,
    })
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Dims { m, k, n } = self.dims;
        writeln!(f, "A: {}x{}, B: {}x{}, C: {}x{}", m, k, k, n, m, n)?;
        writeln!(
            f,
            "Reference time: {:.3} ms  ({:.2} GFLOPS)",
            self.reference_ms, self.reference_gflops
        )?;
        writeln!(
            f,
            "Tiled time (tile={}): {:.3} ms  ({:.2} GFLOPS), max abs diff: {:e}",
            self.primary.tile, self.primary.elapsed_ms, self.primary.gflops, self.primary.divergence
        )?;
        for run in &self.sweep {
            writeln!(
                f,
                "Tile {}: {:.3} ms  ({:.2} GFLOPS), diff={:e}",
                run.tile, run.elapsed_ms, run.gflops, run.divergence
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BenchConfig::default();
        assert_eq!(config.dims, Dims::new(640, 320, 640));
        assert_eq!(config.tile_sizes, vec![8, 16, 32, 64]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_sizes() {
        let mut config = BenchConfig::default();
        config.tile_sizes.push(0);
        assert_eq!(config.validate(), Err(MatmulError::EmptyTile));

        let config = BenchConfig {
            dims: Dims::new(4, 0, 4),
            ..BenchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(MatmulError::EmptyDims { m: 4, k: 0, n: 4 })
        );
        assert!(run_benchmark(&config).is_err());
    }

    #[test]
    fn operands_are_reproducible() {
        let dims = Dims::new(6, 5, 4);
        let (a1, b1) = make_operands(dims, 42);
        let (a2, b2) = make_operands(dims, 42);
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
        assert_eq!(a1.shape(), (6, 5));
        assert_eq!(b1.shape(), (5, 4));
        assert_ne!(make_operands(dims, 43).0, a1);
    }

    #[test]
    fn report_lists_every_tile() {
        let config = BenchConfig {
            dims: Dims::new(20, 12, 18),
            seed: 5,
            primary_tile: 4,
            tile_sizes: vec![3, 7],
        };
        let report = run_benchmark(&config).unwrap();
        assert_eq!(report.primary.tile, TileShape::cubic(4));
        assert_eq!(report.sweep.len(), 2);

        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("Reference time: "));
        assert!(lines[2].starts_with("Tiled time (tile=4): "));
        assert!(lines[3].starts_with("Tile 3: "));
        assert!(lines[4].starts_with("Tile 7: "));
    }
}
