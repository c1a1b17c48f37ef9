//! N-fold antisymmetric tensor powers of single-particle operators.

use block_sparse::BlockSparseBuilder;
use faer::Mat;
use num_complex::Complex64;
use slater_enum::{KernelEnumerator, SlaterEnumerator};

use crate::config::{default_tensor_power_drop_tol, warn_if_dense};
use crate::error::{FermiError, Result};
use crate::operator::FermiOp;
use crate::sector::Sector;

/// `Lambda_n(op)`: the action of the one-body operator `op` on `n`-particle
/// Slater determinants, `Lambda_n(A)[x, y] = det(A[x, y])`.
///
/// Multiplicative (`Lambda_n(AB) = Lambda_n(A) Lambda_n(B)`), so unitaries
/// map to unitaries. Entries with `|det|` at or below
/// [`default_tensor_power_drop_tol`] are not stored.
pub fn tensor_power(op: &FermiOp, n: usize) -> Result<FermiOp> {
    let enumerator = SlaterEnumerator::with_drop_tol(default_tensor_power_drop_tol());
    tensor_power_with(&enumerator, op, n)
}

/// [`tensor_power`] with the entries produced by `enumerator`.
///
/// # Errors
/// - `InvalidOperator` unless `op` is a `(1, 1)` operator
/// - `InvalidSector` if `n > orbs`
/// - `UnsupportedConfiguration` for composite operators
pub fn tensor_power_with<E: KernelEnumerator + ?Sized>(
    enumerator: &E,
    op: &FermiOp,
    n: usize,
) -> Result<FermiOp> {
    let species = op.from_sector().single()?;
    if !op.is_square() || species.n != 1 {
        return Err(FermiError::InvalidOperator {
            message: format!(
                "tensor power needs a (1, 1) operator, got ({}, {})",
                op.p_from(),
                op.p_to()
            ),
        });
    }
    let orbs = species.orbs;
    let sector = Sector::new(orbs, n)?;
    tracing::trace!(orbs, n, "tensor power");

    let a = op.data();
    let matrix: Vec<Complex64> = (0..orbs)
        .flat_map(|i| (0..orbs).map(move |j| a[(i, j)]))
        .collect();
    let enumeration = enumerator.enumerate_tensor_power(orbs, &matrix, n)?;
    if enumeration.dim != sector.dim() {
        return Err(FermiError::ShapeMismatch {
            expected: vec![sector.dim()],
            actual: vec![enumeration.dim],
        });
    }

    let dim = sector.dim();
    let mut builder = BlockSparseBuilder::<Complex64>::with_capacity(
        (1, 1),
        (dim, dim),
        enumeration.entries.len(),
    );
    for e in &enumeration.entries {
        builder.push(0, 0, e.row, e.col, e.value)?;
    }
    let grid = builder.build();
    tracing::debug!(orbs, n, dim, nnz = grid.nnz(), "assembled tensor power");

    warn_if_dense("operator", dim, dim);
    let mut data = Mat::<Complex64>::zeros(dim, dim);
    for (r, c, v) in grid.block(0, 0).iter() {
        data[(r, c)] = v;
    }
    FermiOp::from_sectors(sector.clone(), sector, data)
}
