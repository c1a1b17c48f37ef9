//! Ordered Slater-determinant basis of one particle-number sector.

use crate::binomial::binomial;
use crate::bitfield::{self, Bitfield, MAX_ORBITALS};
use crate::error::{EnumerationError, Result};

/// Ordered basis of the `n`-particle sector over `orbs` orbitals.
///
/// Basis index `i` corresponds to the `i`-th smallest bit string with `n`
/// bits set among the lowest `orbs` bits. For `n == 1` the basis index is the
/// orbital index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlaterBasis {
    orbs: usize,
    n: usize,
    strings: Vec<Bitfield>,
}

impl SlaterBasis {
    /// Enumerate the sector basis.
    ///
    /// # Errors
    /// - `InvalidSector` if `n > orbs`
    /// - `TooManyOrbitals` if `orbs > 64`
    /// - `DimensionOverflow` if `C(orbs, n)` does not fit in usize
    /// - `AllocationFailed` if the bit strings cannot be stored
    pub fn new(orbs: usize, n: usize) -> Result<Self> {
        if n > orbs {
            return Err(EnumerationError::InvalidSector { orbs, n });
        }
        if orbs > MAX_ORBITALS {
            return Err(EnumerationError::TooManyOrbitals {
                orbs,
                max: MAX_ORBITALS,
            });
        }
        let num = binomial(orbs, n).ok_or(EnumerationError::DimensionOverflow { orbs, n })?;

        let mut strings = Vec::new();
        strings
            .try_reserve_exact(num)
            .map_err(|_| EnumerationError::AllocationFailed { elements: num })?;
        let mut f: Bitfield = if n == MAX_ORBITALS {
            Bitfield::MAX
        } else {
            (1 << n) - 1
        };
        for i in 0..num {
            strings.push(f);
            if i + 1 < num {
                f = bitfield::next_same_popcount(f);
            }
        }
        Ok(Self { orbs, n, strings })
    }

    /// Number of orbitals
    pub fn orbs(&self) -> usize {
        self.orbs
    }

    /// Number of particles
    pub fn particles(&self) -> usize {
        self.n
    }

    /// Sector dimension
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Never true for a valid sector; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// All bit strings, ascending
    pub fn strings(&self) -> &[Bitfield] {
        &self.strings
    }

    /// Bit string of basis state `index`.
    ///
    /// # Panics
    /// If `index >= self.len()`.
    pub fn string(&self, index: usize) -> Bitfield {
        self.strings[index]
    }

    /// Basis index of a bit string, if it belongs to this sector.
    pub fn index_of(&self, w: Bitfield) -> Option<usize> {
        self.strings.binary_search(&w).ok()
    }

    /// Occupied orbitals of basis state `index`, ascending.
    ///
    /// # Panics
    /// If `index >= self.len()`.
    pub fn orbitals(&self, index: usize) -> Vec<usize> {
        bitfield::decode(self.strings[index])
    }

    /// Basis index and permutation sign of the creation string
    /// `a+_{x_0} a+_{x_1} ... |vac>` for an arbitrary ordering of orbitals.
    ///
    /// Returns `None` if an orbital is repeated, out of range, or the count
    /// differs from the sector's particle number.
    pub fn index_of_orbitals(&self, orbitals: &[usize]) -> Option<(usize, i8)> {
        if orbitals.len() != self.n || orbitals.iter().any(|&k| k >= self.orbs) {
            return None;
        }
        let w = bitfield::encode(orbitals);
        if w.count_ones() as usize != self.n {
            return None;
        }
        let index = self.index_of(w)?;
        let inversions = orbitals
            .iter()
            .enumerate()
            .map(|(i, &a)| orbitals[i + 1..].iter().filter(|&&b| b < a).count())
            .sum::<usize>();
        let sign = if inversions % 2 == 0 { 1 } else { -1 };
        Some((index, sign))
    }
}
