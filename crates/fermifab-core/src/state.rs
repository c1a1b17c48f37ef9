//! Fermionic states: amplitude vectors over a particle-number sector.

use faer::Mat;
use num_complex::Complex64;
use num_traits::{One, Zero};
use rand::Rng;
use slater_enum::SlaterBasis;

use crate::algebra::{check_factor, FermiLinear};
use crate::config::warn_if_dense;
use crate::error::{FermiError, Result};
use crate::operator::FermiOp;
use crate::sector::Sector;

/// Vector of `C(orbs, n)` complex amplitudes in the Slater-determinant basis.
#[derive(Debug, Clone, PartialEq)]
pub struct FermiState {
    sector: Sector,
    data: Vec<Complex64>,
}

impl FermiState {
    /// First basis state of the sector (amplitude 1 at index 0).
    pub fn new(orbs: usize, n: usize) -> Result<Self> {
        Self::basis(orbs, n, 0)
    }

    /// State with the given amplitudes.
    ///
    /// # Errors
    /// `ShapeMismatch` if `data.len() != C(orbs, n)`.
    pub fn from_data(orbs: usize, n: usize, data: Vec<Complex64>) -> Result<Self> {
        Self::from_sector(Sector::new(orbs, n)?, data)
    }

    /// State on an arbitrary (possibly composite) sector.
    pub fn from_sector(sector: Sector, data: Vec<Complex64>) -> Result<Self> {
        if data.len() != sector.dim() {
            return Err(FermiError::ShapeMismatch {
                expected: vec![sector.dim()],
                actual: vec![data.len()],
            });
        }
        Ok(Self { sector, data })
    }

    pub fn zeros(orbs: usize, n: usize) -> Result<Self> {
        let sector = Sector::new(orbs, n)?;
        warn_if_dense("state", sector.dim(), 1);
        let data = vec![Complex64::zero(); sector.dim()];
        Ok(Self { sector, data })
    }

    /// Basis state `index`.
    pub fn basis(orbs: usize, n: usize, index: usize) -> Result<Self> {
        let mut state = Self::zeros(orbs, n)?;
        let dim = state.dim();
        let slot = state
            .data
            .get_mut(index)
            .ok_or_else(|| FermiError::DimensionMismatch {
                message: format!("basis index {index} out of range for dimension {dim}"),
            })?;
        *slot = Complex64::one();
        Ok(state)
    }

    /// Slater determinant `a+_{x_0} a+_{x_1} ... |vac>`.
    ///
    /// The orbitals may be given in any order; the amplitude carries the
    /// permutation sign. Repeating an orbital gives the zero state.
    ///
    /// # Errors
    /// - `InvalidOrbital` for an orbital `>= orbs`
    /// - `InvalidSector` if more orbitals than `orbs` are listed
    pub fn slater(orbs: usize, orbitals: &[usize]) -> Result<Self> {
        if let Some(&orbital) = orbitals.iter().find(|&&k| k >= orbs) {
            return Err(FermiError::InvalidOrbital { orbital, orbs });
        }
        let n = orbitals.len();
        let mut state = Self::zeros(orbs, n)?;
        let basis = SlaterBasis::new(orbs, n)?;
        if let Some((index, sign)) = basis.index_of_orbitals(orbitals) {
            state.data[index] = Complex64::new(f64::from(sign), 0.0);
        }
        Ok(state)
    }

    /// Normalised state with random complex amplitudes.
    pub fn random<R: Rng + ?Sized>(orbs: usize, n: usize, rng: &mut R) -> Result<Self> {
        let sector = Sector::new(orbs, n)?;
        warn_if_dense("state", sector.dim(), 1);
        let data = (0..sector.dim())
            .map(|_| Complex64::new(rng.random::<f64>() - 0.5, rng.random::<f64>() - 0.5))
            .collect();
        Self { sector, data }.normalized()
    }

    pub fn sector(&self) -> &Sector {
        &self.sector
    }

    /// Total number of orbitals
    pub fn orbs(&self) -> usize {
        self.sector.orbs()
    }

    /// Total number of particles
    pub fn particles(&self) -> usize {
        self.sector.particles()
    }

    pub fn dim(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Complex64> {
        self.data
    }

    /// Copy scaled to unit norm.
    ///
    /// # Errors
    /// `InvalidScalar` for the zero state.
    pub fn normalized(&self) -> Result<Self> {
        self.div(Complex64::new(self.norm(), 0.0))
    }

    /// `<self|other>`
    pub fn inner(&self, other: &Self) -> Result<Complex64> {
        self.check_same_sector(other)?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// `<self|` as an operator from this sector to the vacuum.
    pub fn bra(&self) -> FermiOp {
        let data = Mat::from_fn(1, self.dim(), |_, j| self.data[j].conj());
        FermiOp::from_parts(self.sector.clone(), self.sector.vacuum(), data)
    }

    /// `|self>` as an operator from the vacuum to this sector.
    pub fn ket(&self) -> FermiOp {
        let data = Mat::from_fn(self.dim(), 1, |i, _| self.data[i]);
        FermiOp::from_parts(self.sector.vacuum(), self.sector.clone(), data)
    }

    /// `|self><other|`
    pub fn outer(&self, other: &Self) -> FermiOp {
        warn_if_dense("operator", self.dim(), other.dim());
        let data = Mat::from_fn(self.dim(), other.dim(), |i, j| {
            self.data[i] * other.data[j].conj()
        });
        FermiOp::from_parts(other.sector.clone(), self.sector.clone(), data)
    }

    /// `|self> (x) |other>` on the composite sector.
    pub fn kron(&self, other: &Self) -> Result<Self> {
        let sector = self.sector.kron(&other.sector)?;
        warn_if_dense("state", sector.dim(), 1);
        let mut data = Vec::with_capacity(sector.dim());
        for a in &self.data {
            data.extend(other.data.iter().map(|b| a * b));
        }
        Ok(Self { sector, data })
    }

    pub(crate) fn from_parts(sector: Sector, data: Vec<Complex64>) -> Self {
        debug_assert_eq!(sector.dim(), data.len());
        Self { sector, data }
    }

    fn check_same_sector(&self, other: &Self) -> Result<()> {
        if self.sector != other.sector {
            return Err(FermiError::TypeMismatch {
                lhs: format!("state on {}", self.sector),
                rhs: format!("state on {}", other.sector),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Self, f: impl Fn(Complex64, Complex64) -> Complex64) -> Result<Self> {
        self.check_same_sector(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self::from_parts(self.sector.clone(), data))
    }
}

impl FermiLinear for FermiState {
    fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    fn scale(&self, factor: Complex64) -> Result<Self> {
        check_factor(factor)?;
        let data = self.data.iter().map(|&a| a * factor).collect();
        Ok(Self::from_parts(self.sector.clone(), data))
    }

    fn norm(&self) -> f64 {
        self.data.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
    }
}
