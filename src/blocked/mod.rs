//! Cache-blocked (tiled) matrix multiplication.
//!
//! The product is split into a 3-D grid of blocks over C's rows, C's
//! columns and the shared K axis. Each block multiplies a `TH × TK` piece of
//! A with a `TK × TW` piece of B and accumulates into a `TH × TW` piece of C.
//! Blocks on the far edge of a matrix are clipped to it, so any positive
//! tile shape works for any matrix shape.
//!
//! - `kernel`: multiply-accumulate over one block
//! - `tiled`: drives the kernel over the whole grid

pub mod kernel;
pub mod tiled;

use std::fmt;
use std::ops::Range;

use crate::matrix::Dims;

/// Height, width and depth of one blocking unit.
///
/// `height` runs along C's rows, `width` along C's columns and `depth`
/// along the shared K axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileShape {
    pub height: usize,
    pub width: usize,
    pub depth: usize,
}

impl TileShape {
    pub fn new(height: usize, width: usize, depth: usize) -> Self {
        TileShape {
            height,
            width,
            depth,
        }
    }

    /// Same extent on all three axes.
    pub fn cubic(size: usize) -> Self {
        Self::new(size, size, size)
    }

    /// True if any extent is zero. Such a tile covers nothing.
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0 || self.depth == 0
    }

    /// Number of blocks needed to cover `dims`:
    /// `ceil(M/TH) * ceil(N/TW) * ceil(K/TK)`.
    pub fn block_count(&self, dims: Dims) -> usize {
        if self.is_empty() {
            return 0;
        }
        dims.m.div_ceil(self.height) * dims.n.div_ceil(self.width) * dims.k.div_ceil(self.depth)
    }

    /// Iterate over every block of the grid covering `dims`.
    pub fn blocks(&self, dims: Dims) -> Blocks {
        Blocks::new(dims, *self)
    }
}

impl fmt::Display for TileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.height == self.width && self.width == self.depth {
            write!(f, "{}", self.height)
        } else {
            write!(f, "{}x{}x{}", self.height, self.width, self.depth)
        }
    }
}

/// Origin of one block: C row, C column and K offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileOrigin {
    pub row: usize,
    pub col: usize,
    pub k: usize,
}

impl TileOrigin {
    pub fn new(row: usize, col: usize, k: usize) -> Self {
        TileOrigin { row, col, k }
    }
}

/// A block after clipping to the matrix: half-open ranges over C's rows,
/// C's columns and K.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
    pub depth: Range<usize>,
}

impl Block {
    /// Clip the tile at `origin` with extent `shape` to `dims`, each axis on
    /// its own.
    pub fn clamped(origin: TileOrigin, shape: TileShape, dims: Dims) -> Self {
        Block {
            rows: clamp_range(origin.row, shape.height, dims.m),
            cols: clamp_range(origin.col, shape.width, dims.n),
            depth: clamp_range(origin.k, shape.depth, dims.k),
        }
    }

    pub fn origin(&self) -> TileOrigin {
        TileOrigin::new(self.rows.start, self.cols.start, self.depth.start)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty() || self.depth.is_empty()
    }
}

/// `offset..min(offset + extent, dim)`.
///
/// Tiles hanging over the edge shrink to fit. An origin at or past `dim`, or
/// a zero extent, gives an empty range.
#[inline]
pub fn clamp_range(offset: usize, extent: usize, dim: usize) -> Range<usize> {
    let end = offset.saturating_add(extent).min(dim);
    offset..end.max(offset)
}

/// The grid of blocks covering a product, row blocks outermost, then column
/// blocks, then depth blocks.
///
/// Every yielded block is already clamped to the matrix. The grid is empty
/// if the tile shape has a zero extent or any matrix dimension is zero.
#[derive(Debug, Clone)]
pub struct Blocks {
    dims: Dims,
    shape: TileShape,
    next: Option<TileOrigin>,
}

impl Blocks {
    pub fn new(dims: Dims, shape: TileShape) -> Self {
        let empty = shape.is_empty() || dims.m == 0 || dims.n == 0 || dims.k == 0;
        Blocks {
            dims,
            shape,
            next: (!empty).then(TileOrigin::default),
        }
    }

    fn advance(&self, mut at: TileOrigin) -> Option<TileOrigin> {
        at.k += self.shape.depth;
        if at.k < self.dims.k {
            return Some(at);
        }
        at.k = 0;
        at.col += self.shape.width;
        if at.col < self.dims.n {
            return Some(at);
        }
        at.col = 0;
        at.row += self.shape.height;
        (at.row < self.dims.m).then_some(at)
    }
}

impl Iterator for Blocks {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        let at = self.next?;
        self.next = self.advance(at);
        Some(Block::clamped(at, self.shape, self.dims))
    }
}
