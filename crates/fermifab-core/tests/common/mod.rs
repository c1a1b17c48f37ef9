#![allow(dead_code)]

use fermifab_core::prelude::*;
use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Largest entrywise deviation between two operators on the same sectors.
pub fn max_deviation(a: &FermiOp, b: &FermiOp) -> f64 {
    assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
    let (da, db) = (a.data(), b.data());
    let mut dev = 0.0f64;
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            dev = dev.max((da[(i, j)] - db[(i, j)]).norm());
        }
    }
    dev
}

pub fn assert_op_close(a: &FermiOp, b: &FermiOp, tol: f64) {
    let dev = max_deviation(a, b);
    assert!(dev <= tol, "operators differ by {dev:e} (tolerance {tol:e})");
}

pub fn assert_complex_close(a: Complex64, b: Complex64, tol: f64) {
    assert!((a - b).norm() <= tol, "{a} vs {b} (tolerance {tol:e})");
}

/// Random Hermitian `(p, p)` operator.
pub fn random_hermitian(orbs: usize, p: usize, seed: u64) -> FermiOp {
    let a = FermiOp::random(orbs, p, p, &mut rng(seed)).unwrap();
    a.add(&a.adjoint()).unwrap()
}

/// Random unitary one-body operator (Q factor of a random matrix).
pub fn random_unitary(orbs: usize, seed: u64) -> FermiOp {
    let a = FermiOp::random(orbs, 1, 1, &mut rng(seed)).unwrap();
    a.qr().0
}
