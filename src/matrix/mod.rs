//! Dense row-major matrix storage plus the reference multiplier and the
//! divergence check.
//!
//! These provide the correctness baseline that the tiled implementation
//! is compared against.

pub mod divergence;
pub mod reference;

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::error::{MatmulError, Result};

/// Row-major offset of element `(r, c)` in a matrix with `num_cols` columns.
///
/// No bounds checking happens here; callers stay inside the matrix.
#[inline(always)]
pub fn offset(r: usize, c: usize, num_cols: usize) -> usize {
    r * num_cols + c
}

/// A dense `f32` matrix stored row-major in one flat buffer.
///
/// The buffer always holds exactly `rows * cols` elements.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// A `rows × cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MatmulError::LengthMismatch`] if `data.len() != rows * cols`.
    ///
    /// # Example
    ///
    /// ```
    /// use tiled_matmul::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0,
    ///                                     4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m[(1, 0)], 4.0);
    /// assert!(Matrix::from_vec(2, 2, vec![1.0; 3]).is_err());
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MatmulError::LengthMismatch {
                rows,
                cols,
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Matrix { rows, cols, data })
    }

    /// A `rows × cols` matrix with elements drawn uniformly from `[-1, 1)`.
    ///
    /// Elements are generated in row-major order, so the same RNG state
    /// always produces the same matrix.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let dist = Uniform::new(-1.0f32, 1.0);
        let data = (0..rows * cols).map(|_| dist.sample(&mut *rng)).collect();
        Matrix { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    fn index(&self, (r, c): (usize, usize)) -> &f32 {
        &self.data[offset(r, c, self.cols)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f32 {
        &mut self.data[offset(r, c, self.cols)]
    }
}

// Printing 400k floats is never useful, so only the shape is shown.
impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

/// The `(M, K, N)` triple of a product `C = A × B`.
///
/// A is M×K, B is K×N, C is M×N.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub m: usize,
    pub k: usize,
    pub n: usize,
}

impl Dims {
    pub fn new(m: usize, k: usize, n: usize) -> Self {
        Dims { m, k, n }
    }

    /// Dimensions of `a × b`.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions disagree.
    pub fn of(a: &Matrix, b: &Matrix) -> Self {
        assert_eq!(
            a.cols(),
            b.rows(),
            "inner dimensions differ: A is {}x{}, B is {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        );
        Dims {
            m: a.rows(),
            k: a.cols(),
            n: b.cols(),
        }
    }

    /// Floating point operations in one product (a multiply and an add per term).
    pub fn flops(&self) -> f64 {
        2.0 * (self.m * self.k * self.n) as f64
    }
}
