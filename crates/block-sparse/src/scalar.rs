//! Scalar trait for block-sparse storage.
//!
//! Abstracts over f64 and Complex64 entries.

use std::fmt::Debug;
use std::ops::{AddAssign, Mul};

use num_complex::Complex64;
use num_traits::Zero;

/// Trait for scalar types stored in block-sparse grids.
pub trait Scalar:
    Clone
    + Copy
    + Debug
    + Default
    + PartialEq
    + Zero
    + AddAssign
    + Mul<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Widen to a complex value.
    fn to_complex(self) -> Complex64;
}

impl Scalar for f64 {
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }
}

impl Scalar for Complex64 {
    fn to_complex(self) -> Complex64 {
        self
    }
}
