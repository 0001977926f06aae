//! Multiply-accumulate over a single block.

use super::{Block, TileOrigin, TileShape};
use crate::matrix::{Dims, Matrix, offset};

/// Accumulate one tile's partial product into C.
///
/// Computes `A[rows, depth] × B[depth, cols]` and adds it into `C[rows, cols]`
/// with `+=`, where the ranges start at `origin` and extend by `shape`,
/// each clipped to the matrix on its own. Nothing outside that sub-block
/// of C is touched. A zero extent clips to an empty range and the call does
/// nothing.
///
/// C must already hold zeros (or earlier depth blocks' sums) for this region.
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()` or if `c` is not `a.rows() × b.cols()`.
pub fn tile_matmul(
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    origin: TileOrigin,
    shape: TileShape,
) {
    let dims = Dims::of(a, b);
    assert_eq!(
        c.shape(),
        (dims.m, dims.n),
        "C must be {}x{}",
        dims.m,
        dims.n
    );
    accumulate_block(a, b, c, dims, &Block::clamped(origin, shape, dims));
}

/// Inner loops for an already clamped block, i-k-j order.
///
/// Shared with the tiled driver, which checks the shapes once up front.
#[inline]
pub(crate) fn accumulate_block(a: &Matrix, b: &Matrix, c: &mut Matrix, dims: Dims, block: &Block) {
    let Dims { k, n, .. } = dims;
    let (a, b, c) = (a.as_slice(), b.as_slice(), c.as_mut_slice());

    for i in block.rows.clone() {
        for p in block.depth.clone() {
            let a_ip = a[offset(i, p, k)];
            for j in block.cols.clone() {
                c[offset(i, j, n)] += a_ip * b[offset(p, j, n)];
            }
        }
    }
}
