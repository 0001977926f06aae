//! Tiled GEMM driver.

use log::trace;

use super::TileShape;
use super::kernel::accumulate_block;
use crate::matrix::{Dims, Matrix};

/// Cache-blocked matrix multiplication: C = A × B.
///
/// Allocates a zeroed C and runs the block kernel once for every block of
/// the `ceil(M/TH) × ceil(N/TW) × ceil(K/TK)` grid, row blocks outermost,
/// then column blocks, then depth blocks. Depth blocks add into C, so when
/// `TK < K` each element is summed in pieces and the result can differ from
/// [`matmul_reference`](crate::matmul_reference) in the last bits. It is
/// close, not necessarily bit-identical.
///
/// Tile extents don't need to divide the matrix dimensions; blocks on the
/// edge are clipped. A tile with a zero extent covers nothing and the
/// result stays all zeros.
///
/// # Example
///
/// ```
/// use tiled_matmul::{Matrix, TileShape, matmul_tiled};
///
/// let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
///
/// let c = matmul_tiled(&a, &b, TileShape::new(1, 2, 2));
/// assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
/// ```
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()`.
pub fn matmul_tiled(a: &Matrix, b: &Matrix, shape: TileShape) -> Matrix {
    let dims = Dims::of(a, b);
    let mut c = Matrix::zeros(dims.m, dims.n);

    trace!(
        "tiled {}x{}x{} with tile {}: {} blocks",
        dims.m,
        dims.k,
        dims.n,
        shape,
        shape.block_count(dims)
    );

    for block in shape.blocks(dims) {
        accumulate_block(a, b, &mut c, dims, &block);
    }
    c
}
