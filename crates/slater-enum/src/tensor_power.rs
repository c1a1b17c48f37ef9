//! Antisymmetric tensor powers of single-particle matrices.

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::basis::SlaterBasis;
use crate::error::{EnumerationError, Result};

/// One nonzero entry of an N-fold tensor power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TensorPowerEntry {
    pub row: usize,
    pub col: usize,
    pub value: Complex64,
}

/// Output of [`enumerate_tensor_power`].
#[derive(Debug, Clone, PartialEq)]
pub struct TensorPowerEnumeration {
    /// `C(orbs, n)`
    pub dim: usize,
    pub entries: Vec<TensorPowerEntry>,
}

/// Determinant of the row-major `n x n` matrix stored in `a`.
///
/// Uses LU decomposition with partial pivoting; `a` is overwritten. The
/// determinant of the empty matrix is 1.
///
/// # Panics
/// If `a.len() != n * n`.
pub fn determinant(n: usize, a: &mut [Complex64]) -> Complex64 {
    assert_eq!(a.len(), n * n, "determinant: buffer is not {n} x {n}");
    let mut det = Complex64::one();
    for k in 0..n {
        let pivot = (k..n)
            .max_by(|&i, &j| a[i * n + k].norm().total_cmp(&a[j * n + k].norm()))
            .unwrap_or(k);
        let p = a[pivot * n + k];
        if p.is_zero() {
            return Complex64::zero();
        }
        if pivot != k {
            for c in 0..n {
                a.swap(k * n + c, pivot * n + c);
            }
            det = -det;
        }
        det *= p;
        for r in k + 1..n {
            let factor = a[r * n + k] / p;
            if factor.is_zero() {
                continue;
            }
            for c in k + 1..n {
                let v = a[k * n + c];
                a[r * n + c] -= factor * v;
            }
        }
    }
    det
}

/// Entries of the `n`-fold antisymmetric tensor power of `matrix`.
///
/// `matrix` is the row-major `orbs x orbs` single-particle matrix `A`. For
/// basis configurations `x` (row) and `y` (column) of the `n`-particle
/// sector the entry is `det(A[x, y])`. Entries with `|det| <= drop_tol`
/// (and exact zeros) are skipped. Output is row-major ordered.
///
/// # Errors
/// - `ShapeMismatch` if `matrix.len() != orbs * orbs`
/// - sector errors of [`SlaterBasis::new`]
pub fn enumerate_tensor_power(
    orbs: usize,
    matrix: &[Complex64],
    n: usize,
    drop_tol: f64,
) -> Result<TensorPowerEnumeration> {
    if matrix.len() != orbs * orbs {
        return Err(EnumerationError::ShapeMismatch {
            expected: orbs * orbs,
            actual: matrix.len(),
        });
    }
    let basis = SlaterBasis::new(orbs, n)?;
    let dim = basis.len();
    let configs: Vec<Vec<usize>> = (0..dim).map(|i| basis.orbitals(i)).collect();

    let zero_rows: Vec<bool> = (0..orbs)
        .map(|r| matrix[r * orbs..(r + 1) * orbs].iter().all(|v| v.is_zero()))
        .collect();

    let mut entries = Vec::new();
    let mut sub = vec![Complex64::zero(); n * n];
    for (row, x) in configs.iter().enumerate() {
        // a zero row of A zeroes every minor that selects it
        if x.iter().any(|&r| zero_rows[r]) {
            continue;
        }
        for (col, y) in configs.iter().enumerate() {
            for (a, &r) in x.iter().enumerate() {
                for (b, &c) in y.iter().enumerate() {
                    sub[a * n + b] = matrix[r * orbs + c];
                }
            }
            let value = determinant(n, &mut sub);
            if value.is_zero() || value.norm() <= drop_tol {
                continue;
            }
            entries.push(TensorPowerEntry { row, col, value });
        }
    }
    Ok(TensorPowerEnumeration { dim, entries })
}
