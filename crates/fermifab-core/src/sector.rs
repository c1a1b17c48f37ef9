//! Particle-number sectors and their dimensions.

use std::fmt;

use slater_enum::{binomial, SlaterBasis};

use crate::error::{FermiError, Result};

/// Exact dimension `C(orbs, n)` of the `n`-particle sector.
///
/// # Errors
/// - `InvalidSector` if `n > orbs`
/// - `DimensionOverflow` if the binomial does not fit in usize
pub fn sector_dim(orbs: usize, n: usize) -> Result<usize> {
    if n > orbs {
        return Err(FermiError::InvalidSector { orbs, n });
    }
    binomial(orbs, n).ok_or(FermiError::DimensionOverflow { orbs, n })
}

/// Occupied orbitals of every basis state of the sector, in basis order.
///
/// Row `i` lists the orbitals of basis state `i` in ascending order.
pub fn basis_orbitals(orbs: usize, n: usize) -> Result<Vec<Vec<usize>>> {
    sector_dim(orbs, n)?;
    let basis = SlaterBasis::new(orbs, n)?;
    Ok((0..basis.len()).map(|i| basis.orbitals(i)).collect())
}

/// One fermion species: `n` particles in `orbs` orbitals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Species {
    pub orbs: usize,
    pub n: usize,
}

impl Species {
    pub fn new(orbs: usize, n: usize) -> Result<Self> {
        sector_dim(orbs, n)?;
        Ok(Self { orbs, n })
    }
}

/// Space a state lives in: a product of single-species sectors.
///
/// Ordinary states and operators have exactly one species. Kronecker
/// products concatenate species lists; in a composite sector the first
/// species is the slowest-varying basis index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sector {
    species: Vec<Species>,
    dim: usize,
}

impl Sector {
    /// Single-species sector.
    pub fn new(orbs: usize, n: usize) -> Result<Self> {
        Ok(Self {
            species: vec![Species { orbs, n }],
            dim: sector_dim(orbs, n)?,
        })
    }

    /// Product sector of the given species.
    ///
    /// # Errors
    /// - `UnsupportedConfiguration` for an empty species list
    /// - sector errors of the individual species
    /// - `DimensionOverflow` if the product dimension does not fit in usize
    pub fn composite(species: Vec<Species>) -> Result<Self> {
        if species.is_empty() {
            return Err(FermiError::UnsupportedConfiguration {
                message: "a sector needs at least one species".to_string(),
            });
        }
        let mut dim: usize = 1;
        for s in &species {
            dim = dim
                .checked_mul(sector_dim(s.orbs, s.n)?)
                .ok_or(FermiError::DimensionOverflow {
                    orbs: s.orbs,
                    n: s.n,
                })?;
        }
        Ok(Self { species, dim })
    }

    /// Sector dimension
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn is_composite(&self) -> bool {
        self.species.len() > 1
    }

    /// The only species, or `UnsupportedConfiguration` for composite sectors.
    pub fn single(&self) -> Result<Species> {
        match self.species.as_slice() {
            [s] => Ok(*s),
            _ => Err(FermiError::UnsupportedConfiguration {
                message: format!("composite sector {self} is not supported here"),
            }),
        }
    }

    /// Total number of orbitals over all species
    pub fn orbs(&self) -> usize {
        self.species.iter().map(|s| s.orbs).sum()
    }

    /// Total number of particles over all species
    pub fn particles(&self) -> usize {
        self.species.iter().map(|s| s.n).sum()
    }

    /// Sector with the same orbitals and no particles.
    pub fn vacuum(&self) -> Self {
        Self {
            species: self
                .species
                .iter()
                .map(|s| Species { orbs: s.orbs, n: 0 })
                .collect(),
            dim: 1,
        }
    }

    /// Whether both sectors have the same orbitals species by species.
    pub fn same_orbitals(&self, other: &Self) -> bool {
        self.species.len() == other.species.len()
            && self
                .species
                .iter()
                .zip(&other.species)
                .all(|(a, b)| a.orbs == b.orbs)
    }

    /// Product sector `self (x) other`.
    pub fn kron(&self, other: &Self) -> Result<Self> {
        let mut species = self.species.clone();
        species.extend_from_slice(&other.species);
        Self::composite(species)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, s) in self.species.iter().enumerate() {
            if k > 0 {
                write!(f, " x ")?;
            }
            write!(f, "({} orbs, {} particles)", s.orbs, s.n)?;
        }
        Ok(())
    }
}
