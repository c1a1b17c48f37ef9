//! Representability-condition operators.
//!
//! For a 2-RDM `g2` with associated 1-RDM `g1`:
//!
//! - `Q  = g2 - p2n(g1, 2) + Id_2`
//! - `T1 = p2n(g2, 3) - p2n(g1, 3) + Id_3`
//!
//! Both are positive semidefinite when `g2` comes from an ensemble of
//! `N`-particle states.

use num_complex::Complex64;

use crate::algebra::FermiLinear;
use crate::error::{FermiError, Result};
use crate::operator::FermiOp;
use crate::p2n::p2n;
use crate::rdm::ReducedDensity;

/// One-body input of [`calc_q`] and [`calc_t1`].
#[derive(Debug, Clone, Copy)]
pub enum OneBody<'a> {
    /// Explicit 1-RDM
    Rdm(&'a FermiOp),
    /// Particle number `N`; the 1-RDM is derived as `rdm(g2, 1) / (N - 1)`
    ParticleNumber(usize),
}

impl<'a> From<&'a FermiOp> for OneBody<'a> {
    fn from(g1: &'a FermiOp) -> Self {
        OneBody::Rdm(g1)
    }
}

impl From<usize> for OneBody<'_> {
    fn from(n: usize) -> Self {
        OneBody::ParticleNumber(n)
    }
}

/// Q-condition operator `g2 - p2n(g1, 2) + Id`.
pub fn calc_q<'a>(g2: &FermiOp, g1: impl Into<OneBody<'a>>) -> Result<FermiOp> {
    let orbs = check_two_body(g2)?;
    let g1 = one_body(g2, g1.into())?;
    tracing::trace!(orbs, "Q condition");
    g2.sub(&p2n(&g1, 2)?)?.add(&FermiOp::identity(orbs, 2)?)
}

/// T1-condition operator `p2n(g2, 3) - p2n(g1, 3) + Id`.
pub fn calc_t1<'a>(g2: &FermiOp, g1: impl Into<OneBody<'a>>) -> Result<FermiOp> {
    let orbs = check_two_body(g2)?;
    let g1 = one_body(g2, g1.into())?;
    tracing::trace!(orbs, "T1 condition");
    p2n(g2, 3)?
        .sub(&p2n(&g1, 3)?)?
        .add(&FermiOp::identity(orbs, 3)?)
}

fn check_two_body(g2: &FermiOp) -> Result<usize> {
    if !g2.is_square() || g2.p_from() != 2 {
        return Err(FermiError::InvalidOperator {
            message: format!(
                "expected a (2, 2) operator, got ({}, {})",
                g2.p_from(),
                g2.p_to()
            ),
        });
    }
    Ok(g2.from_sector().single()?.orbs)
}

fn one_body(g2: &FermiOp, g1: OneBody<'_>) -> Result<FermiOp> {
    match g1 {
        OneBody::Rdm(g1) => {
            if !g1.is_square() || g1.p_from() != 1 {
                return Err(FermiError::InvalidOperator {
                    message: format!(
                        "expected a (1, 1) operator, got ({}, {})",
                        g1.p_from(),
                        g1.p_to()
                    ),
                });
            }
            if g1.orbs() != g2.orbs() {
                return Err(FermiError::TypeMismatch {
                    lhs: format!("2-body operator on {} orbitals", g2.orbs()),
                    rhs: format!("1-body operator on {} orbitals", g1.orbs()),
                });
            }
            Ok(g1.clone())
        }
        OneBody::ParticleNumber(n) => {
            if n <= 1 {
                return Err(FermiError::InvalidScalar {
                    message: format!("particle number {n} leaves no pair to reduce"),
                });
            }
            g2.rdm(1)?.div(Complex64::new((n - 1) as f64, 0.0))
        }
    }
}
