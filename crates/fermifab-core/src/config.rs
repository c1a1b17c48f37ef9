//! Process-wide defaults with atomic access.
//!
//! - [`default_tensor_power_drop_tol`]: tensor-power entries with
//!   `|det| <= tol` are not stored (default `0.0`, exact zeros only)
//! - [`dense_warn_dim`]: dense matrices with a side longer than this are
//!   logged at `warn` level before allocation (default `1 << 14`)

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use thiserror::Error;

/// Error for invalid tolerance values.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("tolerance must be finite and non-negative, got {0}")]
pub struct InvalidToleranceError(pub f64);

/// Error for a zero dense warning dimension.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("dense warning dimension must be positive, got {0}")]
pub struct InvalidDimensionError(pub usize);

/// Non-negative tolerance stored as `f64` bits.
struct AtomicTolerance(AtomicU64);

impl AtomicTolerance {
    const fn new(tol: f64) -> Self {
        Self(AtomicU64::new(tol.to_bits()))
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, tol: f64) -> Result<(), InvalidToleranceError> {
        if tol.is_nan() || tol.is_infinite() || tol < 0.0 {
            return Err(InvalidToleranceError(tol));
        }
        self.0.store(tol.to_bits(), Ordering::Relaxed);
        Ok(())
    }
}

static TENSOR_POWER_DROP_TOL: AtomicTolerance = AtomicTolerance::new(0.0);
static DENSE_WARN_DIM: AtomicUsize = AtomicUsize::new(1 << 14);

/// Drop tolerance used by [`tensor_power`](crate::tensor_power).
pub fn default_tensor_power_drop_tol() -> f64 {
    TENSOR_POWER_DROP_TOL.load()
}

/// Set the drop tolerance used by [`tensor_power`](crate::tensor_power).
pub fn set_default_tensor_power_drop_tol(tol: f64) -> Result<(), InvalidToleranceError> {
    TENSOR_POWER_DROP_TOL.store(tol)
}

/// Side length above which dense allocations are logged.
pub fn dense_warn_dim() -> usize {
    DENSE_WARN_DIM.load(Ordering::Relaxed)
}

/// Set the side length above which dense allocations are logged.
pub fn set_dense_warn_dim(dim: usize) -> Result<(), InvalidDimensionError> {
    if dim == 0 {
        return Err(InvalidDimensionError(dim));
    }
    DENSE_WARN_DIM.store(dim, Ordering::Relaxed);
    Ok(())
}

pub(crate) fn warn_if_dense(what: &str, rows: usize, cols: usize) {
    let limit = dense_warn_dim();
    if rows > limit || cols > limit {
        tracing::warn!(rows, cols, limit, "allocating large dense {what}");
    }
}
