//! Grid of sparse blocks in a single arena.
//!
//! All nonzeros of all blocks live in three parallel arrays (row, column,
//! value). Block `(i, j)` owns the contiguous range
//! `offsets[i * cols + j]..offsets[i * cols + j + 1]`, sorted by
//! `(row, col)` without duplicates. Empty blocks own an empty range, so every
//! cell of the grid is present.

use num_complex::Complex64;
use num_traits::Zero;
use rayon::prelude::*;

use crate::error::{BlockSparseError, Result};
use crate::scalar::Scalar;

/// Collects `(block, row, col, value)` entries and builds a
/// [`BlockSparseGrid`].
#[derive(Debug, Clone)]
pub struct BlockSparseBuilder<T: Scalar> {
    grid_shape: (usize, usize),
    block_shape: (usize, usize),
    block: Vec<usize>,
    row: Vec<usize>,
    col: Vec<usize>,
    value: Vec<T>,
}

impl<T: Scalar> BlockSparseBuilder<T> {
    /// Builder for a `grid_shape.0 x grid_shape.1` grid of
    /// `block_shape.0 x block_shape.1` blocks.
    pub fn new(grid_shape: (usize, usize), block_shape: (usize, usize)) -> Self {
        Self::with_capacity(grid_shape, block_shape, 0)
    }

    /// Builder with room for `capacity` entries.
    pub fn with_capacity(
        grid_shape: (usize, usize),
        block_shape: (usize, usize),
        capacity: usize,
    ) -> Self {
        Self {
            grid_shape,
            block_shape,
            block: Vec::with_capacity(capacity),
            row: Vec::with_capacity(capacity),
            col: Vec::with_capacity(capacity),
            value: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries pushed so far (duplicates counted separately).
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Add `value` at `(row, col)` of block `(block_row, block_col)`.
    ///
    /// Repeated positions are summed by [`build`](Self::build).
    pub fn push(
        &mut self,
        block_row: usize,
        block_col: usize,
        row: usize,
        col: usize,
        value: T,
    ) -> Result<()> {
        let (rows, cols) = self.grid_shape;
        if block_row >= rows || block_col >= cols {
            return Err(BlockSparseError::BlockIndexOutOfBounds {
                index: vec![block_row, block_col],
                shape: vec![rows, cols],
            });
        }
        let (dim_row, dim_col) = self.block_shape;
        if row >= dim_row || col >= dim_col {
            return Err(BlockSparseError::EntryOutOfBounds {
                index: vec![row, col],
                shape: vec![dim_row, dim_col],
            });
        }
        self.block.push(block_row * cols + block_col);
        self.row.push(row);
        self.col.push(col);
        self.value.push(value);
        Ok(())
    }

    /// Group entries by block, sort each block by `(row, col)` and merge
    /// duplicates by summation. Merged entries that cancel to exactly zero
    /// are dropped.
    ///
    /// Grouping is a counting sort over the block index, linear in the
    /// number of entries; per-block sorting runs in parallel.
    pub fn build(self) -> BlockSparseGrid<T> {
        let num_blocks = self.grid_shape.0 * self.grid_shape.1;

        let mut counts = vec![0usize; num_blocks + 1];
        for &b in &self.block {
            counts[b + 1] += 1;
        }
        for b in 0..num_blocks {
            counts[b + 1] += counts[b];
        }

        let mut cursor = counts.clone();
        let mut grouped = vec![(0usize, 0usize, T::zero()); self.value.len()];
        for (k, &b) in self.block.iter().enumerate() {
            grouped[cursor[b]] = (self.row[k], self.col[k], self.value[k]);
            cursor[b] += 1;
        }

        let mut chunks: Vec<&mut [(usize, usize, T)]> = Vec::with_capacity(num_blocks);
        let mut rest = grouped.as_mut_slice();
        for b in 0..num_blocks {
            let len = counts[b + 1] - counts[b];
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
            chunks.push(head);
            rest = tail;
        }
        let merged_lens: Vec<usize> = chunks
            .into_par_iter()
            .map(|chunk| sort_and_merge(chunk))
            .collect();

        let total: usize = merged_lens.iter().sum();
        let mut offsets = Vec::with_capacity(num_blocks + 1);
        let mut row_idx = Vec::with_capacity(total);
        let mut col_idx = Vec::with_capacity(total);
        let mut values = Vec::with_capacity(total);
        offsets.push(0);
        for (b, &len) in merged_lens.iter().enumerate() {
            for &(r, c, v) in &grouped[counts[b]..counts[b] + len] {
                row_idx.push(r);
                col_idx.push(c);
                values.push(v);
            }
            offsets.push(row_idx.len());
        }

        BlockSparseGrid {
            grid_shape: self.grid_shape,
            block_shape: self.block_shape,
            offsets,
            row_idx,
            col_idx,
            values,
        }
    }
}

/// Sort a block's entries and merge duplicates in place; returns the number
/// of surviving entries, which occupy the front of `chunk`.
fn sort_and_merge<T: Scalar>(chunk: &mut [(usize, usize, T)]) -> usize {
    chunk.sort_unstable_by_key(|&(r, c, _)| (r, c));
    let mut out = 0;
    let mut k = 0;
    while k < chunk.len() {
        let (r, c, mut v) = chunk[k];
        k += 1;
        while k < chunk.len() && chunk[k].0 == r && chunk[k].1 == c {
            v += chunk[k].2;
            k += 1;
        }
        if !v.is_zero() {
            chunk[out] = (r, c, v);
            out += 1;
        }
    }
    out
}

/// Grid of sparse blocks with uniform block shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSparseGrid<T: Scalar> {
    grid_shape: (usize, usize),
    block_shape: (usize, usize),
    offsets: Vec<usize>,
    row_idx: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> BlockSparseGrid<T> {
    /// Number of block rows and columns
    pub fn grid_shape(&self) -> (usize, usize) {
        self.grid_shape
    }

    /// Shape shared by every block
    pub fn block_shape(&self) -> (usize, usize) {
        self.block_shape
    }

    /// Number of cells in the grid
    pub fn num_blocks(&self) -> usize {
        self.grid_shape.0 * self.grid_shape.1
    }

    /// Total number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Block `(i, j)`.
    ///
    /// # Panics
    /// If the index is outside the grid.
    pub fn block(&self, i: usize, j: usize) -> SparseBlock<'_, T> {
        assert!(
            i < self.grid_shape.0 && j < self.grid_shape.1,
            "block ({i}, {j}) out of bounds for grid {:?}",
            self.grid_shape
        );
        self.block_at(i * self.grid_shape.1 + j)
    }

    /// Block `(i, j)`, or an error if the index is outside the grid.
    pub fn try_block(&self, i: usize, j: usize) -> Result<SparseBlock<'_, T>> {
        if i >= self.grid_shape.0 || j >= self.grid_shape.1 {
            return Err(BlockSparseError::BlockIndexOutOfBounds {
                index: vec![i, j],
                shape: vec![self.grid_shape.0, self.grid_shape.1],
            });
        }
        Ok(self.block_at(i * self.grid_shape.1 + j))
    }

    /// Block by row-major linear index.
    ///
    /// # Panics
    /// If `linear >= self.num_blocks()`.
    pub fn block_at(&self, linear: usize) -> SparseBlock<'_, T> {
        let range = self.offsets[linear]..self.offsets[linear + 1];
        SparseBlock {
            shape: self.block_shape,
            rows: &self.row_idx[range.clone()],
            cols: &self.col_idx[range.clone()],
            values: &self.values[range],
        }
    }

    /// Iterate over all blocks in row-major order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = ((usize, usize), SparseBlock<'_, T>)> {
        let cols = self.grid_shape.1.max(1);
        (0..self.num_blocks()).map(move |b| ((b / cols, b % cols), self.block_at(b)))
    }
}

/// Borrowed view of one sparse block, entries sorted by `(row, col)`.
#[derive(Debug, Clone, Copy)]
pub struct SparseBlock<'a, T> {
    shape: (usize, usize),
    rows: &'a [usize],
    cols: &'a [usize],
    values: &'a [T],
}

impl<'a, T: Scalar> SparseBlock<'a, T> {
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries as `(row, col, value)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + 'a {
        let (rows, cols, values) = (self.rows, self.cols, self.values);
        (0..values.len()).map(move |k| (rows[k], cols[k], values[k]))
    }

    /// Entry at `(row, col)`, zero if not stored.
    pub fn get(&self, row: usize, col: usize) -> T {
        let start = self.rows.partition_point(|&r| r < row);
        let end = self.rows.partition_point(|&r| r <= row);
        match self.cols[start..end].binary_search(&col) {
            Ok(k) => self.values[start + k],
            Err(_) => T::zero(),
        }
    }

    /// `B x` for a complex vector `x` of length `shape.1`.
    pub fn matvec(&self, x: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_len(x.len(), self.shape.1)?;
        let mut y = vec![Complex64::zero(); self.shape.0];
        for (r, c, v) in self.iter() {
            y[r] += v.to_complex() * x[c];
        }
        Ok(y)
    }

    /// `x^H B x` for a square block.
    pub fn expectation(&self, x: &[Complex64]) -> Result<Complex64> {
        self.check_len(x.len(), self.shape.0)?;
        self.check_len(x.len(), self.shape.1)?;
        Ok(self
            .iter()
            .map(|(r, c, v)| x[r].conj() * v.to_complex() * x[c])
            .sum())
    }

    /// `tr(B M) = sum over stored (r, c, v) of v * M[c, r]`, with `M` given
    /// as an element accessor.
    pub fn trace_product(&self, m: impl Fn(usize, usize) -> Complex64) -> Complex64 {
        self.iter().map(|(r, c, v)| v.to_complex() * m(c, r)).sum()
    }

    /// Dense row-major copy of the block.
    pub fn to_dense(&self) -> Vec<T> {
        let mut out = vec![T::zero(); self.shape.0 * self.shape.1];
        for (r, c, v) in self.iter() {
            out[r * self.shape.1 + c] = v;
        }
        out
    }

    fn check_len(&self, actual: usize, expected: usize) -> Result<()> {
        if actual != expected {
            return Err(BlockSparseError::LengthMismatch { expected, actual });
        }
        Ok(())
    }
}
