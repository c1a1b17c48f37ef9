//! Error types for block-sparse grids.

use thiserror::Error;

/// Error type for block-sparse grid construction and access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlockSparseError {
    /// Block index is out of bounds.
    #[error("Block index {index:?} out of bounds for grid shape {shape:?}")]
    BlockIndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// Entry position is outside its block.
    #[error("Entry {index:?} out of bounds for block shape {shape:?}")]
    EntryOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// Input vector length does not match the block.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Result type for block-sparse operations.
pub type Result<T> = std::result::Result<T, BlockSparseError>;
