//! Reduced density matrices.
//!
//! For a state `psi` with `N` particles the `p`-body RDM is the
//! `(p, p)` operator with `G[i, j] = <psi| a+_J a_I |psi>`, where `I` and `J`
//! are the `i`-th and `j`-th `p`-particle configurations. It is Hermitian
//! with trace `C(N, p)` for normalised states.

use faer::Mat;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::error::{FermiError, Result};
use crate::kernel::{assemble, KernelGrid};
use crate::operator::FermiOp;
use crate::sector::Sector;
use crate::state::FermiState;

/// Objects that have a `p`-body reduced density matrix.
pub trait ReducedDensity {
    fn rdm(&self, p: usize) -> Result<FermiOp>;
}

/// `p`-body RDM of a state or density operator.
pub fn rdm<T: ReducedDensity + ?Sized>(x: &T, p: usize) -> Result<FermiOp> {
    x.rdm(p)
}

impl ReducedDensity for FermiState {
    /// # Errors
    /// - `DimensionMismatch` if `p` exceeds the particle number
    /// - `UnsupportedConfiguration` for composite states
    fn rdm(&self, p: usize) -> Result<FermiOp> {
        let species = self.sector().single()?;
        check_order(p, species.n)?;
        tracing::trace!(orbs = species.orbs, n = species.n, p, "state rdm");
        let kernel = assemble(species.orbs, p, species.n, species.n)?;
        let psi = self.data();
        let cells = contract_cells(&kernel, |block| block.expectation(psi))?;
        finish(species.orbs, p, &kernel, cells)
    }
}

impl ReducedDensity for FermiOp {
    /// RDM of a `(q, q)` density operator `Gamma`:
    /// `G[i, j] = tr(K[i][j] Gamma)`. For `Gamma = |psi><psi|` this is the
    /// RDM of `psi`; for the `q`-RDM of an `N`-particle state it is
    /// `C(N - p, q - p)` times the `p`-RDM.
    ///
    /// # Errors
    /// - `InvalidOperator` if the operator is not square in particle number
    /// - `DimensionMismatch` if `p > q`
    /// - `UnsupportedConfiguration` for composite operators
    fn rdm(&self, p: usize) -> Result<FermiOp> {
        if !self.is_square() {
            return Err(FermiError::InvalidOperator {
                message: format!(
                    "density operator must map a sector to itself, got {} -> {}",
                    self.p_from(),
                    self.p_to()
                ),
            });
        }
        let species = self.from_sector().single()?;
        check_order(p, species.n)?;
        tracing::trace!(orbs = species.orbs, q = species.n, p, "operator rdm");
        let kernel = assemble(species.orbs, p, species.n, species.n)?;
        let gamma = self.data();
        let cells = contract_cells(&kernel, |block| {
            Ok(block.trace_product(|r, c| gamma[(r, c)]))
        })?;
        finish(species.orbs, p, &kernel, cells)
    }
}

fn check_order(p: usize, n: usize) -> Result<()> {
    if p > n {
        return Err(FermiError::DimensionMismatch {
            message: format!("cannot form a {p}-body RDM of a {n}-particle object"),
        });
    }
    Ok(())
}

/// Evaluate `f` on every block in parallel, in row-major block order.
fn contract_cells<F>(kernel: &KernelGrid, f: F) -> Result<Vec<Complex64>>
where
    F: Fn(block_sparse::SparseBlock<'_, f64>) -> block_sparse::Result<Complex64> + Sync,
{
    (0..kernel.num_blocks())
        .into_par_iter()
        .map(|b| f(kernel.block_at(b)).map_err(FermiError::from))
        .collect()
}

fn finish(orbs: usize, p: usize, kernel: &KernelGrid, cells: Vec<Complex64>) -> Result<FermiOp> {
    let (rows, cols) = kernel.grid_shape();
    let data = Mat::from_fn(rows, cols, |i, j| cells[i * cols + j]);
    let sector = Sector::new(orbs, p)?;
    FermiOp::from_sectors(sector.clone(), sector, data)
}
