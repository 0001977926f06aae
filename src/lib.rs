//! Naive vs cache-tiled matrix multiplication, side by side.
//!
//! A small benchmark for loop blocking. The reference multiplier is a plain
//! i-k-j triple loop and serves as ground truth. The tiled multiplier walks
//! a 3-D grid of `TH × TW × TK` blocks and accumulates each block's partial
//! product into C. Results are compared by max absolute difference, since
//! splitting K into blocks is allowed to change rounding.
//!
//! ## Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tiled_matmul::{Matrix, TileShape, matmul_reference, matmul_tiled, max_abs_diff};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let a = Matrix::random(64, 32, &mut rng);
//! let b = Matrix::random(32, 64, &mut rng);
//!
//! let c_ref = matmul_reference(&a, &b);
//! let c = matmul_tiled(&a, &b, TileShape::cubic(16));
//!
//! assert_eq!(c.shape(), (64, 64));
//! assert!(max_abs_diff(&c_ref, &c) < 1e-4);
//! ```
//!
//! ## What's inside
//!
//! - Row-major `f32` storage with fixed-seed random fill
//! - Reference i-k-j multiplier
//! - Tile kernel with per-axis edge clipping, and a block-grid iterator
//! - Benchmark harness sweeping cubic tile sizes

pub mod blocked;
pub mod error;
pub mod harness;
pub mod matrix;

pub use blocked::kernel::tile_matmul;
pub use blocked::tiled::matmul_tiled;
pub use blocked::{Block, Blocks, TileOrigin, TileShape};
pub use error::{MatmulError, Result};
pub use harness::{BenchConfig, BenchReport, TileRun, run_benchmark};
pub use matrix::divergence::max_abs_diff;
pub use matrix::reference::matmul_reference;
pub use matrix::{Dims, Matrix};
