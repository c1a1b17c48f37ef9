//! Enumeration of Slater-determinant matrix elements.
//!
//! This crate produces the raw nonzero entries from which the fermionic
//! kernels are assembled: products of creation and annihilation strings
//! acting between particle-number sectors, and N-fold antisymmetric tensor
//! powers of single-particle matrices.
//!
//! Slater determinants are encoded as `u64` bit strings with orbital 0 in
//! the least significant bit. The basis of a sector is the list of all bit
//! strings with the right population count, sorted numerically.
//!
//! # Core Types
//!
//! - [`SlaterBasis`]: ordered basis of one sector (bit strings and lookup)
//! - [`KernelConfig`] / [`KernelEnumeration`]: input and output of the
//!   creation/annihilation kernel enumeration
//! - [`TensorPowerEnumeration`]: entries of an antisymmetric tensor power
//! - [`KernelEnumerator`]: the seam consumed by assemblers, implemented by
//!   [`SlaterEnumerator`]
//!
//! # Example
//!
//! ```
//! use slater_enum::{KernelConfig, KernelEnumerator, SlaterEnumerator};
//!
//! // a^dagger_j a_i on the 2-particle sector of 4 orbitals
//! let kernel = SlaterEnumerator::default()
//!     .enumerate_kernel(&KernelConfig::single(4, 1, 2, 2))
//!     .unwrap();
//!
//! assert_eq!((kernel.rows, kernel.cols), (4, 4));
//! assert_eq!((kernel.dim_row, kernel.dim_col), (6, 6));
//! // every 2-particle state has 2 particles to remove and 3 holes to fill
//! assert_eq!(kernel.entries.len(), 6 * 2 * 3);
//! ```

mod basis;
pub mod binomial;
pub mod bitfield;
mod enumerator;
mod error;
mod kernel;
mod tensor_power;

pub use basis::SlaterBasis;
pub use binomial::binomial;
pub use enumerator::{KernelEnumerator, SlaterEnumerator};
pub use error::{EnumerationError, Result};
pub use kernel::{enumerate_kernel, KernelConfig, KernelEntry, KernelEnumeration};
pub use tensor_power::{
    determinant, enumerate_tensor_power, TensorPowerEntry, TensorPowerEnumeration,
};
