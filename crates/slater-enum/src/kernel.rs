//! Enumeration of creation/annihilation kernels.
//!
//! The kernel for `(orbs, p1, n1, n2)` is a grid of operators
//! `K[i][j] = a+_J a_I` mapping the `n1`-particle sector to the `n2`-particle
//! sector, where `I` runs over the `p1`-particle configurations (block rows)
//! and `J` over the `p2 = n2 - n1 + p1` particle configurations (block
//! columns). For `p1 = 1`, `n1 = n2` this is the familiar `a+_j a_i`.

use crate::basis::SlaterBasis;
use crate::binomial::binomial;
use crate::bitfield::{self, Bitfield};
use crate::error::{EnumerationError, Result};

/// Per-species kernel parameters.
///
/// Only single-species configurations are enumerated; the list form keeps
/// the call shape of a multi-species kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    pub orbs: Vec<usize>,
    pub p1: Vec<usize>,
    pub n1: Vec<usize>,
    pub n2: Vec<usize>,
}

impl KernelConfig {
    /// Single-species configuration
    pub fn single(orbs: usize, p1: usize, n1: usize, n2: usize) -> Self {
        Self {
            orbs: vec![orbs],
            p1: vec![p1],
            n1: vec![n1],
            n2: vec![n2],
        }
    }

    /// Number of species
    pub fn species(&self) -> usize {
        self.orbs.len()
    }

    fn validate_lists(&self) -> Result<()> {
        let len = self.orbs.len();
        if len == 0 {
            return Err(EnumerationError::InconsistentConfiguration {
                message: "no species given".to_string(),
            });
        }
        if self.p1.len() != len || self.n1.len() != len || self.n2.len() != len {
            return Err(EnumerationError::InconsistentConfiguration {
                message: format!(
                    "list lengths differ: orbs={}, p1={}, n1={}, n2={}",
                    len,
                    self.p1.len(),
                    self.n1.len(),
                    self.n2.len()
                ),
            });
        }
        Ok(())
    }
}

/// One nonzero matrix element of a kernel block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelEntry {
    /// Index of the annihilated configuration `I`
    pub block_row: usize,
    /// Index of the created configuration `J`
    pub block_col: usize,
    /// Basis index in the target (`n2`) sector
    pub mat_row: usize,
    /// Basis index in the source (`n1`) sector
    pub mat_col: usize,
    pub value: f64,
}

/// Output of [`enumerate_kernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct KernelEnumeration {
    /// `C(orbs, p1)`
    pub rows: usize,
    /// `C(orbs, p2)`
    pub cols: usize,
    /// `C(orbs, n2)`
    pub dim_row: usize,
    /// `C(orbs, n1)`
    pub dim_col: usize,
    pub entries: Vec<KernelEntry>,
}

/// Enumerate all nonzero entries of the kernel described by `config`.
///
/// Entries are emitted in a fixed order: source state ascending, then
/// annihilated configuration ascending, then created configuration
/// ascending. No duplicates are produced.
///
/// # Errors
/// - `InconsistentConfiguration` for empty or ragged per-species lists
/// - `UnsupportedConfiguration` for more than one species
/// - `IncompatibleSectors` if `p1 > n1` or `n2 - n1 + p1 < 0`
/// - `InvalidSector`, `TooManyOrbitals`, `DimensionOverflow` from the sector
///   bases
pub fn enumerate_kernel(config: &KernelConfig) -> Result<KernelEnumeration> {
    config.validate_lists()?;
    if config.species() > 1 {
        return Err(EnumerationError::UnsupportedConfiguration {
            species: config.species(),
        });
    }
    let (orbs, p1, n1, n2) = (config.orbs[0], config.p1[0], config.n1[0], config.n2[0]);
    if p1 > n1 || n2 + p1 < n1 {
        return Err(EnumerationError::IncompatibleSectors { p1, n1, n2 });
    }
    let p2 = n2 + p1 - n1;

    let source = SlaterBasis::new(orbs, n1)?;
    let target = SlaterBasis::new(orbs, n2)?;
    let annihilated = SlaterBasis::new(orbs, p1)?;
    let created = SlaterBasis::new(orbs, p2)?;

    // every source state has C(n1, p1) removals, each leaving
    // C(orbs - n1 + p1, p2) ways to refill
    let capacity = binomial(n1, p1)
        .zip(binomial(orbs - n1 + p1, p2))
        .and_then(|(a, b)| a.checked_mul(b))
        .and_then(|per_state| per_state.checked_mul(source.len()))
        .ok_or(EnumerationError::DimensionOverflow { orbs, n: n1 })?;
    let mut entries = Vec::new();
    entries
        .try_reserve_exact(capacity)
        .map_err(|_| EnumerationError::AllocationFailed { elements: capacity })?;

    let full: Bitfield = if orbs == bitfield::MAX_ORBITALS {
        Bitfield::MAX
    } else {
        (1 << orbs) - 1
    };

    for (mat_col, &src) in source.strings().iter().enumerate() {
        for_each_subset(src, p1, |i_conf| {
            let sign0 = bitfield::annihilation_sign(src, i_conf);
            let rest = src ^ i_conf;
            let block_row = index_in(&annihilated, i_conf);
            for_each_subset(full & !rest, p2, |j_conf| {
                let dst = rest | j_conf;
                let sign1 = bitfield::annihilation_sign(dst, j_conf);
                entries.push(KernelEntry {
                    block_row,
                    block_col: index_in(&created, j_conf),
                    mat_row: index_in(&target, dst),
                    mat_col,
                    value: f64::from(sign0 * sign1),
                });
            });
        });
    }

    Ok(KernelEnumeration {
        rows: annihilated.len(),
        cols: created.len(),
        dim_row: target.len(),
        dim_col: source.len(),
        entries,
    })
}

// Strings passed here are constructed with the basis's popcount inside its
// orbital range, so the lookup always succeeds.
fn index_in(basis: &SlaterBasis, w: Bitfield) -> usize {
    basis.index_of(w).unwrap_or_else(|| {
        unreachable!("bit string {w:#b} outside sector ({}, {})", basis.orbs(), basis.particles())
    })
}

/// Call `f` for every subset of `mask` with exactly `k` elements, in
/// ascending numeric order.
fn for_each_subset(mask: Bitfield, k: usize, mut f: impl FnMut(Bitfield)) {
    let positions = bitfield::decode(mask);
    let m = positions.len();
    if k > m {
        return;
    }
    if k == 0 {
        f(0);
        return;
    }
    let mut comb: Bitfield = if k == bitfield::MAX_ORBITALS {
        Bitfield::MAX
    } else {
        (1 << k) - 1
    };
    let count = binomial(m, k).unwrap_or(0);
    for step in 0..count {
        f(deposit(comb, &positions));
        if step + 1 < count {
            comb = bitfield::next_same_popcount(comb);
        }
    }
}

/// Scatter the low bits of `comb` onto `positions`.
fn deposit(comb: Bitfield, positions: &[usize]) -> Bitfield {
    let mut out = 0;
    let mut rest = comb;
    while rest != 0 {
        out |= 1 << positions[rest.trailing_zeros() as usize];
        rest &= rest - 1;
    }
    out
}
