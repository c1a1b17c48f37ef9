//! Fermionic operators: dense matrices between particle-number sectors.

use faer::{Mat, MatRef};
use num_complex::Complex64;
use rand::Rng;

use crate::algebra::{check_factor, Applied, Apply, FermiLinear};
use crate::config::warn_if_dense;
use crate::error::{FermiError, Result};
use crate::linalg;
use crate::sector::Sector;
use crate::state::FermiState;

/// Linear map from the `p_from`-particle sector to the `p_to`-particle
/// sector over `orbs` orbitals, stored as a dense
/// `C(orbs, p_to) x C(orbs, p_from)` complex matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FermiOp {
    from: Sector,
    to: Sector,
    data: Mat<Complex64>,
}

/// Hermitian eigensystem of a square operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigensystem {
    /// Eigenvalues, ascending
    pub values: Vec<f64>,
    /// Eigenvectors as columns of a `(p, p)` operator
    pub vectors: FermiOp,
}

impl FermiOp {
    /// Operator with the given matrix.
    ///
    /// # Errors
    /// - `InvalidSector` if `p_from` or `p_to` exceeds `orbs`
    /// - `ShapeMismatch` if `data` is not `C(orbs, p_to) x C(orbs, p_from)`
    pub fn new(orbs: usize, p_from: usize, p_to: usize, data: Mat<Complex64>) -> Result<Self> {
        Self::from_sectors(Sector::new(orbs, p_from)?, Sector::new(orbs, p_to)?, data)
    }

    /// Operator between arbitrary sectors with the same orbitals.
    pub fn from_sectors(from: Sector, to: Sector, data: Mat<Complex64>) -> Result<Self> {
        if !from.same_orbitals(&to) {
            return Err(FermiError::TypeMismatch {
                lhs: format!("source {from}"),
                rhs: format!("target {to}"),
            });
        }
        let expected = vec![to.dim(), from.dim()];
        let actual = vec![data.nrows(), data.ncols()];
        if expected != actual {
            return Err(FermiError::ShapeMismatch { expected, actual });
        }
        Ok(Self { from, to, data })
    }

    /// Operator with entries `f(row, col)`.
    pub fn from_fn(
        orbs: usize,
        p_from: usize,
        p_to: usize,
        f: impl FnMut(usize, usize) -> Complex64,
    ) -> Result<Self> {
        let from = Sector::new(orbs, p_from)?;
        let to = Sector::new(orbs, p_to)?;
        warn_if_dense("operator", to.dim(), from.dim());
        let data = Mat::from_fn(to.dim(), from.dim(), f);
        Ok(Self { from, to, data })
    }

    pub fn zeros(orbs: usize, p_from: usize, p_to: usize) -> Result<Self> {
        Self::from_fn(orbs, p_from, p_to, |_, _| Complex64::new(0.0, 0.0))
    }

    /// Identity on the `p`-particle sector.
    pub fn identity(orbs: usize, p: usize) -> Result<Self> {
        Self::from_fn(orbs, p, p, |i, j| {
            if i == j {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            }
        })
    }

    /// Operator with random complex entries in `[-0.5, 0.5) + i[-0.5, 0.5)`.
    pub fn random<R: Rng + ?Sized>(
        orbs: usize,
        p_from: usize,
        p_to: usize,
        rng: &mut R,
    ) -> Result<Self> {
        Self::from_fn(orbs, p_from, p_to, |_, _| {
            Complex64::new(rng.random::<f64>() - 0.5, rng.random::<f64>() - 0.5)
        })
    }

    pub(crate) fn from_parts(from: Sector, to: Sector, data: Mat<Complex64>) -> Self {
        debug_assert_eq!((data.nrows(), data.ncols()), (to.dim(), from.dim()));
        Self { from, to, data }
    }

    pub fn from_sector(&self) -> &Sector {
        &self.from
    }

    pub fn to_sector(&self) -> &Sector {
        &self.to
    }

    /// Total number of orbitals
    pub fn orbs(&self) -> usize {
        self.from.orbs()
    }

    /// Particle number of the source sector
    pub fn p_from(&self) -> usize {
        self.from.particles()
    }

    /// Particle number of the target sector
    pub fn p_to(&self) -> usize {
        self.to.particles()
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_square(&self) -> bool {
        self.from == self.to
    }

    pub fn data(&self) -> MatRef<'_, Complex64> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Mat<Complex64> {
        self.data
    }

    /// Whether `|A[i,j] - conj(A[j,i])| <= tol` for all entries.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.is_square() && linalg::hermitian_defect(self.data.as_ref()) <= tol
    }

    /// Conjugate transpose; swaps source and target sectors.
    pub fn adjoint(&self) -> Self {
        Self::from_parts(
            self.to.clone(),
            self.from.clone(),
            self.data.adjoint().to_owned(),
        )
    }

    /// `self * rhs`
    ///
    /// # Errors
    /// `DimensionMismatch` if the target of `rhs` differs from the source of
    /// `self`.
    pub fn compose(&self, rhs: &FermiOp) -> Result<FermiOp> {
        if rhs.to != self.from {
            return Err(FermiError::DimensionMismatch {
                message: format!("cannot compose: {} does not map into {}", rhs.to, self.from),
            });
        }
        warn_if_dense("operator", self.nrows(), rhs.ncols());
        let data = linalg::matmul(self.data.as_ref(), rhs.data.as_ref());
        Ok(Self::from_parts(rhs.from.clone(), self.to.clone(), data))
    }

    /// Apply to a state; a one-dimensional target sector yields a scalar.
    pub fn contract(&self, state: &FermiState) -> Result<Applied> {
        let out = self.apply(state)?;
        if out.dim() == 1 {
            Ok(Applied::Scalar(out.data()[0]))
        } else {
            Ok(Applied::State(out))
        }
    }

    /// Trace of a square operator.
    pub fn trace(&self) -> Result<Complex64> {
        self.check_square("trace")?;
        Ok(linalg::trace(self.data.as_ref()))
    }

    /// `self^k` for a square operator.
    pub fn powm(&self, k: u32) -> Result<Self> {
        self.check_square("matrix power")?;
        Ok(Self::from_parts(
            self.from.clone(),
            self.to.clone(),
            linalg::powm(self.data.as_ref(), k),
        ))
    }

    /// Kronecker product on composite sectors.
    pub fn kron(&self, other: &Self) -> Result<Self> {
        let from = self.from.kron(&other.from)?;
        let to = self.to.kron(&other.to)?;
        warn_if_dense("operator", to.dim(), from.dim());
        let data = linalg::kron(self.data.as_ref(), other.data.as_ref());
        Ok(Self::from_parts(from, to, data))
    }

    /// Eigen-decomposition of a Hermitian operator.
    ///
    /// Only the lower triangle is read.
    pub fn eigh(&self) -> Result<Eigensystem> {
        self.check_square("eigendecomposition")?;
        let (values, vectors) = linalg::eigh(self.data.as_ref())?;
        Ok(Eigensystem {
            values,
            vectors: Self::from_parts(self.from.clone(), self.to.clone(), vectors),
        })
    }

    /// QR decomposition `self = q.compose(r)`; `q` is unitary on the target
    /// sector.
    pub fn qr(&self) -> (FermiOp, FermiOp) {
        let (q, r) = linalg::qr(self.data.as_ref());
        (
            Self::from_parts(self.to.clone(), self.to.clone(), q),
            Self::from_parts(self.from.clone(), self.to.clone(), r),
        )
    }

    fn check_square(&self, what: &str) -> Result<()> {
        if !self.is_square() {
            return Err(FermiError::DimensionMismatch {
                message: format!("{what} needs a square operator, got {} -> {}", self.from, self.to),
            });
        }
        Ok(())
    }

    fn check_same_sectors(&self, other: &Self) -> Result<()> {
        if self.from != other.from || self.to != other.to {
            return Err(FermiError::TypeMismatch {
                lhs: format!("operator {} -> {}", self.from, self.to),
                rhs: format!("operator {} -> {}", other.from, other.to),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Self, f: impl Fn(Complex64, Complex64) -> Complex64) -> Result<Self> {
        self.check_same_sectors(other)?;
        let data = Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            f(self.data[(i, j)], other.data[(i, j)])
        });
        Ok(Self::from_parts(self.from.clone(), self.to.clone(), data))
    }
}

impl FermiLinear for FermiOp {
    fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    fn scale(&self, factor: Complex64) -> Result<Self> {
        check_factor(factor)?;
        let data = Mat::from_fn(self.nrows(), self.ncols(), |i, j| self.data[(i, j)] * factor);
        Ok(Self::from_parts(self.from.clone(), self.to.clone(), data))
    }

    fn norm(&self) -> f64 {
        self.data.norm_l2()
    }
}

impl Apply<FermiState> for FermiOp {
    type Output = FermiState;

    /// # Errors
    /// `DimensionMismatch` if the state does not live on the source sector.
    fn apply(&self, state: &FermiState) -> Result<FermiState> {
        if state.sector() != &self.from {
            return Err(FermiError::DimensionMismatch {
                message: format!(
                    "operator acts on {}, state lives on {}",
                    self.from,
                    state.sector()
                ),
            });
        }
        let data = linalg::matvec(self.data.as_ref(), state.data());
        Ok(FermiState::from_parts(self.to.clone(), data))
    }
}

impl Apply<FermiOp> for FermiOp {
    type Output = FermiOp;

    fn apply(&self, rhs: &FermiOp) -> Result<FermiOp> {
        self.compose(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_shape_checks() {
        let data = Mat::<Complex64>::zeros(6, 4);
        let op = FermiOp::new(4, 1, 2, data).unwrap();
        assert_eq!((op.p_from(), op.p_to(), op.orbs()), (1, 2, 4));
        let bad = Mat::<Complex64>::zeros(4, 6);
        assert_eq!(
            FermiOp::new(4, 1, 2, bad).unwrap_err(),
            FermiError::ShapeMismatch {
                expected: vec![6, 4],
                actual: vec![4, 6]
            }
        );
    }

    #[test]
    fn test_compose_and_apply() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let a = FermiOp::random(4, 1, 2, &mut rng).unwrap();
        let b = FermiOp::random(4, 2, 1, &mut rng).unwrap();
        let ab = a.compose(&b).unwrap();
        assert_eq!((ab.p_from(), ab.p_to()), (2, 2));
        assert!(matches!(a.compose(&a), Err(FermiError::DimensionMismatch { .. })));

        let psi = FermiState::random(4, 2, &mut rng).unwrap();
        let lhs = ab.apply(&psi).unwrap();
        let rhs = a.apply(&b.apply(&psi).unwrap()).unwrap();
        assert!(lhs.sub(&rhs).unwrap().norm() < 1e-12);
        assert_eq!(a.apply(&b).unwrap(), ab);
        assert!(matches!(a.apply(&psi), Err(FermiError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_trace_and_powm() {
        let id = FermiOp::identity(5, 2).unwrap();
        assert_eq!(id.trace().unwrap(), c(10.0));
        assert_eq!(id.powm(3).unwrap(), id);
        let rect = FermiOp::zeros(5, 1, 2).unwrap();
        assert!(matches!(rect.trace(), Err(FermiError::DimensionMismatch { .. })));
        assert!(matches!(rect.powm(2), Err(FermiError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_bra_ket_contract() {
        let psi = FermiState::slater(4, &[1, 3]).unwrap();
        let phi = FermiState::slater(4, &[3, 1]).unwrap();
        let overlap = psi.bra().contract(&phi).unwrap();
        assert_eq!(overlap, Applied::Scalar(c(-1.0)));
        let back = psi.ket().contract(&FermiState::new(4, 0).unwrap()).unwrap();
        assert_eq!(back.into_state(), Some(psi));
    }

    #[test]
    fn test_eigh_reconstructs() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let a = FermiOp::random(4, 1, 1, &mut rng).unwrap();
        let h = a.add(&a.adjoint()).unwrap();
        assert!(h.is_hermitian(1e-14));
        let eig = h.eigh().unwrap();
        assert!(eig.values.windows(2).all(|w| w[0] <= w[1]));
        let v = &eig.vectors;
        let d = FermiOp::from_fn(4, 1, 1, |i, j| {
            if i == j {
                c(eig.values[i])
            } else {
                c(0.0)
            }
        })
        .unwrap();
        let back = v.compose(&d).unwrap().compose(&v.adjoint()).unwrap();
        assert!(back.sub(&h).unwrap().norm() < 1e-10);
    }

    #[test]
    fn test_qr() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        // 6 x 4 and 4 x 6 operators
        for (p_from, p_to) in [(1, 2), (2, 1)] {
            let a = FermiOp::random(4, p_from, p_to, &mut rng).unwrap();
            let (q, r) = a.qr();
            assert_eq!((q.p_from(), q.p_to()), (p_to, p_to));
            assert_eq!((r.p_from(), r.p_to()), (p_from, p_to));
            assert_eq!((r.nrows(), r.ncols()), (a.nrows(), a.ncols()));
            assert!(q.compose(&r).unwrap().sub(&a).unwrap().norm() < 1e-10);
            let qq = q.adjoint().compose(&q).unwrap();
            let id = FermiOp::identity(4, p_to).unwrap();
            assert!(qq.sub(&id).unwrap().norm() < 1e-10);
        }
    }

    #[test]
    fn test_kron_composite() {
        let a = FermiOp::identity(2, 1).unwrap();
        let b = FermiOp::identity(3, 1).unwrap();
        let ab = a.kron(&b).unwrap();
        let expected = FermiOp::from_parts(
            ab.from_sector().clone(),
            ab.to_sector().clone(),
            Mat::<Complex64>::identity(6, 6),
        );
        assert_eq!(ab, expected);
        assert!(ab.from_sector().is_composite());
        assert_eq!(ab.trace().unwrap(), c(6.0));
    }
}
