use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatmulError {
    #[error("buffer length mismatch: {rows}x{cols} needs {expected} elements, got {got}")]
    LengthMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },
    #[error("matrix dimensions must be positive: [{m}x{k}] @ [{k}x{n}]")]
    EmptyDims { m: usize, k: usize, n: usize },
    #[error("tile size must be positive")]
    EmptyTile,
}

pub type Result<T> = std::result::Result<T, MatmulError>;
