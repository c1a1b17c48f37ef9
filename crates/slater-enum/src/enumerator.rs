//! The enumeration seam consumed by kernel assemblers.

use num_complex::Complex64;

use crate::error::Result;
use crate::kernel::{self, KernelConfig, KernelEnumeration};
use crate::tensor_power::{self, TensorPowerEnumeration};

/// Producer of Slater-determinant matrix elements.
///
/// Implementations must be deterministic: identical inputs give identical
/// output sequences.
pub trait KernelEnumerator: Send + Sync {
    /// Nonzero entries of the creation/annihilation kernel.
    fn enumerate_kernel(&self, config: &KernelConfig) -> Result<KernelEnumeration>;

    /// Nonzero entries of the `n`-fold antisymmetric tensor power of the
    /// row-major `orbs x orbs` matrix `matrix`.
    fn enumerate_tensor_power(
        &self,
        orbs: usize,
        matrix: &[Complex64],
        n: usize,
    ) -> Result<TensorPowerEnumeration>;
}

/// Bit-field enumerator over `u64` Slater strings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlaterEnumerator {
    drop_tol: f64,
}

impl SlaterEnumerator {
    /// Enumerator that drops tensor-power entries with `|value| <= drop_tol`.
    ///
    /// Negative or NaN tolerances behave like `0.0` (only exact zeros are
    /// dropped).
    pub fn with_drop_tol(drop_tol: f64) -> Self {
        let drop_tol = if drop_tol.is_nan() { 0.0 } else { drop_tol.max(0.0) };
        Self { drop_tol }
    }

    pub fn drop_tol(&self) -> f64 {
        self.drop_tol
    }
}

impl KernelEnumerator for SlaterEnumerator {
    fn enumerate_kernel(&self, config: &KernelConfig) -> Result<KernelEnumeration> {
        kernel::enumerate_kernel(config)
    }

    fn enumerate_tensor_power(
        &self,
        orbs: usize,
        matrix: &[Complex64],
        n: usize,
    ) -> Result<TensorPowerEnumeration> {
        tensor_power::enumerate_tensor_power(orbs, matrix, n, self.drop_tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_tol() {
        assert_eq!(SlaterEnumerator::default().drop_tol(), 0.0);
        assert_eq!(SlaterEnumerator::with_drop_tol(-1.0).drop_tol(), 0.0);
        assert_eq!(SlaterEnumerator::with_drop_tol(f64::NAN).drop_tol(), 0.0);

        // diag(1, 1e-3): the 2-particle power is the single entry 1e-3
        let m = [
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1e-3, 0.0),
        ];
        let kept = SlaterEnumerator::default()
            .enumerate_tensor_power(2, &m, 2)
            .unwrap();
        assert_eq!(kept.entries.len(), 1);
        let dropped = SlaterEnumerator::with_drop_tol(1e-2)
            .enumerate_tensor_power(2, &m, 2)
            .unwrap();
        assert!(dropped.entries.is_empty());
    }
}
