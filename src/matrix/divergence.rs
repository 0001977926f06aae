use super::Matrix;

/// Largest absolute elementwise difference between two matrices.
///
/// Used as a correctness proxy for results that only differ by floating
/// point accumulation order. Returns `0.0` for empty matrices.
///
/// # Panics
///
/// Panics if the shapes differ. Comparing matrices of different shapes is a
/// caller bug, so nothing is truncated.
pub fn max_abs_diff(x: &Matrix, y: &Matrix) -> f32 {
    assert_eq!(
        x.shape(),
        y.shape(),
        "divergence needs equal shapes: {}x{} vs {}x{}",
        x.rows(),
        x.cols(),
        y.rows(),
        y.cols()
    );

    x.as_slice()
        .iter()
        .zip(y.as_slice())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max)
}
