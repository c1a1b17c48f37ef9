//! Single-orbital creation and annihilation operators.

use faer::Mat;
use num_complex::Complex64;

use crate::error::{FermiError, Result};
use crate::kernel::{assemble, KernelGrid};
use crate::operator::FermiOp;
use crate::sector::Sector;

/// `a_orbital` from the `n`-particle to the `(n - 1)`-particle sector.
pub fn annihilation(orbs: usize, orbital: usize, n: usize) -> Result<FermiOp> {
    check_orbital(orbs, orbital)?;
    let target = n.checked_sub(1).ok_or_else(|| FermiError::DimensionMismatch {
        message: "cannot annihilate a particle from the vacuum".to_string(),
    })?;
    // block (I, 0) of the kernel is a_I
    let kernel = assemble(orbs, 1, n, target)?;
    block_operator(&kernel, orbital, 0, orbs, n, target)
}

/// `a+_orbital` from the `n`-particle to the `(n + 1)`-particle sector.
pub fn creation(orbs: usize, orbital: usize, n: usize) -> Result<FermiOp> {
    check_orbital(orbs, orbital)?;
    // block (0, J) of the kernel is a+_J
    let kernel = assemble(orbs, 0, n, n + 1)?;
    block_operator(&kernel, 0, orbital, orbs, n, n + 1)
}

fn check_orbital(orbs: usize, orbital: usize) -> Result<()> {
    if orbital >= orbs {
        return Err(FermiError::InvalidOrbital { orbital, orbs });
    }
    Ok(())
}

fn block_operator(
    kernel: &KernelGrid,
    i: usize,
    j: usize,
    orbs: usize,
    n_from: usize,
    n_to: usize,
) -> Result<FermiOp> {
    let block = kernel.try_block(i, j)?;
    let (rows, cols) = block.shape();
    let mut data = Mat::<Complex64>::zeros(rows, cols);
    for (r, c, v) in block.iter() {
        data[(r, c)] = Complex64::new(v, 0.0);
    }
    FermiOp::from_sectors(Sector::new(orbs, n_from)?, Sector::new(orbs, n_to)?, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Apply, FermiLinear};
    use crate::state::FermiState;

    #[test]
    fn test_create_on_vacuum() {
        let vac = FermiState::new(3, 0).unwrap();
        let one = creation(3, 2, 0).unwrap().apply(&vac).unwrap();
        assert_eq!(one, FermiState::slater(3, &[2]).unwrap());
    }

    #[test]
    fn test_sign_convention() {
        // a+_0 |1> = |0 1>, a+_2 |1> = -|1 2>
        let one = FermiState::slater(3, &[1]).unwrap();
        let a = creation(3, 0, 1).unwrap().apply(&one).unwrap();
        assert_eq!(a, FermiState::slater(3, &[0, 1]).unwrap());
        let b = creation(3, 2, 1).unwrap().apply(&one).unwrap();
        assert_eq!(b, FermiState::slater(3, &[2, 1]).unwrap());
    }

    #[test]
    fn test_annihilate() {
        let psi = FermiState::slater(4, &[0, 3]).unwrap();
        let out = annihilation(4, 3, 2).unwrap().apply(&psi).unwrap();
        // a_3 a+_0 a+_3 |vac> = -a+_0 |vac>
        let expected = FermiState::slater(4, &[0]).unwrap().scale_real(-1.0).unwrap();
        assert_eq!(out, expected);
        let none = annihilation(4, 1, 2).unwrap().apply(&psi).unwrap();
        assert_eq!(none.data().iter().filter(|a| a.norm() > 0.0).count(), 0);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            annihilation(3, 0, 0),
            Err(FermiError::DimensionMismatch { .. })
        ));
        assert_eq!(
            creation(3, 3, 1).unwrap_err(),
            FermiError::InvalidOrbital {
                orbital: 3,
                orbs: 3
            }
        );
        assert_eq!(
            creation(3, 0, 3).unwrap_err(),
            FermiError::InvalidSector { orbs: 3, n: 4 }
        );
    }
}
