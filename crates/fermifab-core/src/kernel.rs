//! Block-sparse assembly of creation/annihilation kernels.
//!
//! `assemble(orbs, p1, n1, n2)` returns the grid `K` with
//! `K[i][j] = a+_J a_I`, where `I` is the `i`-th `p1`-particle configuration
//! and `J` the `j`-th configuration of `p2 = n2 - n1 + p1` particles. Each
//! block maps the `n1`-particle sector to the `n2`-particle sector and has
//! shape `(C(orbs, n2), C(orbs, n1))`.

use block_sparse::{BlockSparseBuilder, BlockSparseGrid};
use slater_enum::{KernelConfig, KernelEnumerator, SlaterEnumerator};

use crate::error::{FermiError, Result};
use crate::sector::sector_dim;

/// Kernel block grid with `+-1` entries
pub type KernelGrid = BlockSparseGrid<f64>;

/// Assemble the kernel with the default Slater enumerator.
pub fn assemble(orbs: usize, p1: usize, n1: usize, n2: usize) -> Result<KernelGrid> {
    assemble_with(&SlaterEnumerator::default(), orbs, p1, n1, n2)
}

/// Assemble the kernel from the entries produced by `enumerator`.
///
/// Entries are grouped by block, sorted by `(row, col)` and duplicates are
/// summed. Blocks that receive no entries are present and empty.
///
/// # Errors
/// - `InvalidSector` if `n1 > orbs` or `n2 > orbs`
/// - `DimensionMismatch` if `p1 > n1` or `p2` is negative
/// - `ShapeMismatch` if the enumerator reports shapes or entries that do not
///   fit the requested kernel
pub fn assemble_with<E: KernelEnumerator + ?Sized>(
    enumerator: &E,
    orbs: usize,
    p1: usize,
    n1: usize,
    n2: usize,
) -> Result<KernelGrid> {
    let dim_col = sector_dim(orbs, n1)?;
    let dim_row = sector_dim(orbs, n2)?;
    if p1 > n1 {
        return Err(FermiError::DimensionMismatch {
            message: format!("cannot annihilate {p1} of {n1} particles"),
        });
    }
    let p2 = (n2 + p1).checked_sub(n1).ok_or_else(|| FermiError::DimensionMismatch {
        message: format!("n2 - n1 + p1 = {n2} - {n1} + {p1} is negative"),
    })?;
    let rows = sector_dim(orbs, p1)?;
    let cols = sector_dim(orbs, p2)?;

    tracing::trace!(orbs, p1, n1, n2, "enumerating kernel");
    let enumeration = enumerator.enumerate_kernel(&KernelConfig::single(orbs, p1, n1, n2))?;

    let expected = vec![rows, cols, dim_row, dim_col];
    let actual = vec![
        enumeration.rows,
        enumeration.cols,
        enumeration.dim_row,
        enumeration.dim_col,
    ];
    if expected != actual {
        return Err(FermiError::ShapeMismatch { expected, actual });
    }

    let mut builder = BlockSparseBuilder::with_capacity(
        (rows, cols),
        (dim_row, dim_col),
        enumeration.entries.len(),
    );
    for e in &enumeration.entries {
        builder.push(e.block_row, e.block_col, e.mat_row, e.mat_col, e.value)?;
    }
    let grid = builder.build();
    tracing::debug!(
        orbs,
        p1,
        n1,
        n2,
        rows,
        cols,
        dim_row,
        dim_col,
        entries = enumeration.entries.len(),
        nnz = grid.nnz(),
        "assembled kernel"
    );
    Ok(grid)
}
