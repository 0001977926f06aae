use super::{Dims, Matrix, offset};

/// Reference matrix multiplication using i-k-j loop order.
///
/// Every `C[i][j]` is accumulated in `f32` directly in the output buffer, in
/// order of increasing `k`. That fixed order is what the tiled results are
/// measured against, so this function stays a plain triple loop.
///
/// Use this as a correctness baseline, not for performance.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k)
/// * `b` - Matrix B (k × n)
///
/// Returns C (m × n).
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()`.
pub fn matmul_reference(a: &Matrix, b: &Matrix) -> Matrix {
    let Dims { m, k, n } = Dims::of(a, b);
    let (a, b) = (a.as_slice(), b.as_slice());

    let mut out = Matrix::zeros(m, n);
    let c = out.as_mut_slice();
    for i in 0..m {
        for p in 0..k {
            let a_ip = a[offset(i, p, k)];
            for j in 0..n {
                c[offset(i, j, n)] += a_ip * b[offset(p, j, n)];
            }
        }
    }
    out
}
