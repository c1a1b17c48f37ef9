//! Fermionic many-particle states and operators.
//!
//! States and operators live on particle-number sectors: the `n`-particle
//! sector over `orbs` orbitals has dimension `C(orbs, n)` and is spanned by
//! Slater determinants. On top of that this crate provides:
//!
//! - reduced density matrices ([`rdm`], [`ReducedDensity`])
//! - lifting of `p`-body operators to `N` particles ([`p2n`])
//! - antisymmetric tensor powers of one-body operators ([`tensor_power`])
//! - representability-condition operators ([`calc_q`], [`calc_t1`])
//!
//! All of them are built from block-sparse kernels of creation/annihilation
//! strings ([`assemble`]).
//!
//! # Example
//!
//! ```
//! use fermifab_core::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! let psi = FermiState::random(6, 3, &mut rng).unwrap();
//!
//! let g1 = rdm(&psi, 1).unwrap();
//! assert_eq!((g1.nrows(), g1.ncols()), (6, 6));
//! // the 1-RDM of a normalised state has trace N
//! assert!((g1.trace().unwrap().re - 3.0).abs() < 1e-12);
//!
//! // <psi| p2n(h) |psi> = tr(h g1)
//! let h = FermiOp::identity(6, 1).unwrap();
//! let energy = psi.inner(&p2n(&h, 3).unwrap().apply(&psi).unwrap()).unwrap();
//! assert!((energy.re - 3.0).abs() < 1e-12);
//! ```

mod algebra;
mod config;
mod error;
mod kernel;
mod ladder;
mod linalg;
mod operator;
mod p2n;
mod rdm;
mod repr;
mod sector;
mod state;
mod tensor_power;

pub use algebra::{Applied, Apply, FermiLinear};
pub use config::{
    default_tensor_power_drop_tol, dense_warn_dim, set_default_tensor_power_drop_tol,
    set_dense_warn_dim, InvalidDimensionError, InvalidToleranceError,
};
pub use error::{FermiError, Result};
pub use kernel::{assemble, assemble_with, KernelGrid};
pub use ladder::{annihilation, creation};
pub use operator::{Eigensystem, FermiOp};
pub use p2n::{number_operator, p2n};
pub use rdm::{rdm, ReducedDensity};
pub use repr::{calc_q, calc_t1, OneBody};
pub use sector::{basis_orbitals, sector_dim, Sector, Species};
pub use state::FermiState;
pub use tensor_power::{tensor_power, tensor_power_with};

/// Types and traits needed by most callers.
pub mod prelude {
    pub use crate::{
        calc_q, calc_t1, p2n, rdm, tensor_power, Applied, Apply, FermiError, FermiLinear,
        FermiOp, FermiState, ReducedDensity,
    };
}
