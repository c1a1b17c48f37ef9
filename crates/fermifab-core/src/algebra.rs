//! Vector-space and application traits shared by states and operators.

use num_complex::Complex64;

use crate::error::{FermiError, Result};
use crate::linalg::is_finite;
use crate::state::FermiState;

/// Linear structure of fermionic states and operators.
///
/// `add` and `sub` require both operands to live on the same sectors
/// (`TypeMismatch` otherwise). Scalars must be finite; divisors must also be
/// nonzero (`InvalidScalar`).
pub trait FermiLinear: Sized {
    fn add(&self, other: &Self) -> Result<Self>;

    fn sub(&self, other: &Self) -> Result<Self>;

    fn scale(&self, factor: Complex64) -> Result<Self>;

    /// Frobenius (for states: Euclidean) norm
    fn norm(&self) -> f64;

    fn div(&self, divisor: Complex64) -> Result<Self> {
        if !is_finite(divisor) || divisor == Complex64::new(0.0, 0.0) {
            return Err(FermiError::InvalidScalar {
                message: format!("cannot divide by {divisor}"),
            });
        }
        self.scale(divisor.inv())
    }

    /// `self * factor` for a real factor
    fn scale_real(&self, factor: f64) -> Result<Self> {
        self.scale(Complex64::new(factor, 0.0))
    }
}

pub(crate) fn check_factor(factor: Complex64) -> Result<()> {
    if !is_finite(factor) {
        return Err(FermiError::InvalidScalar {
            message: format!("non-finite factor {factor}"),
        });
    }
    Ok(())
}

/// Application of an operator to a state or to another operator.
pub trait Apply<Rhs> {
    type Output;

    fn apply(&self, rhs: &Rhs) -> Result<Self::Output>;
}

/// Result of contracting an operator with a state.
///
/// An operator whose target sector is one-dimensional (e.g. a bra) yields a
/// plain number.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    State(FermiState),
    Scalar(Complex64),
}

impl Applied {
    pub fn into_state(self) -> Option<FermiState> {
        match self {
            Applied::State(s) => Some(s),
            Applied::Scalar(_) => None,
        }
    }

    pub fn into_scalar(self) -> Option<Complex64> {
        match self {
            Applied::Scalar(z) => Some(z),
            Applied::State(_) => None,
        }
    }
}
