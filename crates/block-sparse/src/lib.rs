//! Block-sparse grids for fermionic kernels.
//!
//! A [`BlockSparseGrid`] is a two-dimensional grid of sparse matrices that all
//! share one shape. Every cell is present, even when it holds no entries.
//! Entries of all blocks are kept in one arena; a block is a contiguous,
//! `(row, col)`-sorted range of it.
//!
//! # Example
//!
//! ```
//! use block_sparse::BlockSparseBuilder;
//!
//! let mut builder = BlockSparseBuilder::<f64>::new((2, 2), (3, 3));
//! builder.push(0, 1, 2, 0, 1.0).unwrap();
//! builder.push(0, 1, 2, 0, 1.0).unwrap();
//! let grid = builder.build();
//!
//! assert_eq!(grid.nnz(), 1);
//! assert_eq!(grid.block(0, 1).get(2, 0), 2.0);
//! assert!(grid.block(1, 1).is_empty());
//! ```

mod error;
mod grid;
mod scalar;

pub use error::{BlockSparseError, Result};
pub use grid::{BlockSparseBuilder, BlockSparseGrid, SparseBlock};
pub use scalar::Scalar;
