//! Lifting of `p`-body operators to the `N`-particle sector.

use faer::Mat;
use num_complex::Complex64;
use num_traits::Zero;

use crate::config::warn_if_dense;
use crate::error::{FermiError, Result};
use crate::kernel::assemble;
use crate::operator::FermiOp;
use crate::sector::Sector;

/// Lift the `(p, p)` operator `h` to `H = sum_ij h[i, j] K[j][i]` on the
/// `n`-particle sector, with `K = assemble(orbs, p, n, n)`.
///
/// Dual to the RDM: `<psi|H|psi> = tr(h rdm(psi, p))`.
///
/// # Errors
/// - `InvalidOperator` if `h` changes the particle number
/// - `DimensionMismatch` if `n < p`
/// - `InvalidSector` if `n > orbs`
/// - `UnsupportedConfiguration` for composite operators
pub fn p2n(h: &FermiOp, n: usize) -> Result<FermiOp> {
    if !h.is_square() {
        return Err(FermiError::InvalidOperator {
            message: format!(
                "p2N needs a (p, p) operator, got ({}, {})",
                h.p_from(),
                h.p_to()
            ),
        });
    }
    let species = h.from_sector().single()?;
    let (orbs, p) = (species.orbs, species.n);
    if n < p {
        return Err(FermiError::DimensionMismatch {
            message: format!("cannot lift a {p}-body operator to {n} particles"),
        });
    }
    let target = Sector::new(orbs, n)?;
    tracing::trace!(orbs, p, n, "p2n");

    let kernel = assemble(orbs, p, n, n)?;
    let dim = target.dim();
    warn_if_dense("operator", dim, dim);
    let mut out = Mat::<Complex64>::zeros(dim, dim);
    let coeffs = h.data();
    for ((j, i), block) in kernel.iter_blocks() {
        let coeff = coeffs[(i, j)];
        if coeff.is_zero() {
            continue;
        }
        for (r, c, v) in block.iter() {
            out[(r, c)] += coeff * v;
        }
    }
    FermiOp::from_sectors(target.clone(), target, out)
}

/// `N`-particle number operator, `p2n(identity(orbs, 1), n)`.
pub fn number_operator(orbs: usize, n: usize) -> Result<FermiOp> {
    p2n(&FermiOp::identity(orbs, 1)?, n)
}
