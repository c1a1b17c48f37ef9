//! Dense linear algebra on faer matrices.

use faer::linalg::matmul::matmul as faer_matmul;
use faer::{Accum, Mat, MatRef, Par, Side};
use num_complex::Complex64;
use num_traits::One;

use crate::error::{FermiError, Result};

/// `a * b`
pub(crate) fn matmul(a: MatRef<'_, Complex64>, b: MatRef<'_, Complex64>) -> Mat<Complex64> {
    debug_assert_eq!(a.ncols(), b.nrows());
    let mut c = Mat::<Complex64>::zeros(a.nrows(), b.ncols());
    let mut c_mat = c.as_mut();
    faer_matmul(&mut c_mat, Accum::Replace, a, b, Complex64::one(), Par::Seq);
    c
}

/// `a * x` for a vector stored as a slice.
pub(crate) fn matvec(a: MatRef<'_, Complex64>, x: &[Complex64]) -> Vec<Complex64> {
    debug_assert_eq!(a.ncols(), x.len());
    let x_mat = Mat::from_fn(x.len(), 1, |i, _| x[i]);
    let y = matmul(a, x_mat.as_ref());
    (0..a.nrows()).map(|i| y[(i, 0)]).collect()
}

/// Kronecker product; row `i1 * b.nrows() + i2`, column `j1 * b.ncols() + j2`.
pub(crate) fn kron(a: MatRef<'_, Complex64>, b: MatRef<'_, Complex64>) -> Mat<Complex64> {
    let (br, bc) = (b.nrows(), b.ncols());
    Mat::from_fn(a.nrows() * br, a.ncols() * bc, |i, j| {
        a[(i / br, j / bc)] * b[(i % br, j % bc)]
    })
}

/// `a^k` by repeated squaring.
pub(crate) fn powm(a: MatRef<'_, Complex64>, k: u32) -> Mat<Complex64> {
    let n = a.nrows();
    let mut result = Mat::<Complex64>::identity(n, n);
    let mut base = a.to_owned();
    let mut e = k;
    while e > 0 {
        if e & 1 == 1 {
            result = matmul(result.as_ref(), base.as_ref());
        }
        e >>= 1;
        if e > 0 {
            base = matmul(base.as_ref(), base.as_ref());
        }
    }
    result
}

pub(crate) fn trace(a: MatRef<'_, Complex64>) -> Complex64 {
    (0..a.nrows().min(a.ncols())).map(|i| a[(i, i)]).sum()
}

/// Eigenvalues (ascending) and eigenvectors (columns) of the Hermitian part
/// stored in the lower triangle of `a`.
pub(crate) fn eigh(a: MatRef<'_, Complex64>) -> Result<(Vec<f64>, Mat<Complex64>)> {
    let evd = a
        .self_adjoint_eigen(Side::Lower)
        .map_err(|e| FermiError::Decomposition(format!("{e:?}")))?;
    let s = evd.S().column_vector();
    let values = (0..s.nrows()).map(|i| s[i].re).collect();
    Ok((values, evd.U().to_owned()))
}

/// Full QR decomposition `a = q r` with `q` of shape `m x m` and `r` of
/// shape `m x n`.
pub(crate) fn qr(a: MatRef<'_, Complex64>) -> (Mat<Complex64>, Mat<Complex64>) {
    let (m, n) = (a.nrows(), a.ncols());
    let qr = a.qr();
    // faer stores only the leading min(m, n) rows of R
    let thin = qr.R();
    let r = Mat::from_fn(m, n, |i, j| {
        if i <= j && i < thin.nrows() {
            thin[(i, j)]
        } else {
            Complex64::new(0.0, 0.0)
        }
    });
    (qr.compute_Q(), r)
}

/// Largest absolute deviation from Hermiticity.
pub(crate) fn hermitian_defect(a: MatRef<'_, Complex64>) -> f64 {
    let n = a.nrows();
    let mut defect = 0.0f64;
    for i in 0..n {
        for j in 0..=i {
            defect = defect.max((a[(i, j)] - a[(j, i)].conj()).norm());
        }
    }
    defect
}

pub(crate) fn is_finite(z: Complex64) -> bool {
    z.re.is_finite() && z.im.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_matmul_and_matvec() {
        let a = Mat::from_fn(2, 3, |i, j| c((i * 3 + j) as f64, 0.0));
        let b = Mat::from_fn(3, 1, |i, _| c(1.0, i as f64));
        let ab = matmul(a.as_ref(), b.as_ref());
        // row 0: 0*1 + 1*(1+i) + 2*(1+2i) = 3 + 5i
        assert!((ab[(0, 0)] - c(3.0, 5.0)).norm() < 1e-14);
        let y = matvec(a.as_ref(), &[c(1.0, 0.0), c(1.0, 1.0), c(1.0, 2.0)]);
        assert!((y[1] - ab[(1, 0)]).norm() < 1e-14);
    }

    #[test]
    fn test_kron_layout() {
        let a = Mat::from_fn(2, 2, |i, j| c((2 * i + j + 1) as f64, 0.0));
        let id = Mat::<Complex64>::identity(3, 3);
        let k = kron(a.as_ref(), id.as_ref());
        assert_eq!((k.nrows(), k.ncols()), (6, 6));
        assert_eq!(k[(3, 0)], c(3.0, 0.0));
        assert_eq!(k[(4, 1)], c(3.0, 0.0));
        assert_eq!(k[(4, 0)], c(0.0, 0.0));
    }

    #[test]
    fn test_powm() {
        // nilpotent shift
        let s = Mat::from_fn(3, 3, |i, j| {
            if i == j + 1 {
                c(1.0, 0.0)
            } else {
                c(0.0, 0.0)
            }
        });
        assert_eq!(powm(s.as_ref(), 0), Mat::<Complex64>::identity(3, 3));
        assert_eq!(powm(s.as_ref(), 2)[(2, 0)], c(1.0, 0.0));
        assert_eq!(powm(s.as_ref(), 3), Mat::<Complex64>::zeros(3, 3));
    }

    #[test]
    fn test_eigh_pauli_y() {
        let y = Mat::from_fn(2, 2, |i, j| match (i, j) {
            (0, 1) => c(0.0, -1.0),
            (1, 0) => c(0.0, 1.0),
            _ => c(0.0, 0.0),
        });
        let (values, vectors) = eigh(y.as_ref()).unwrap();
        assert!((values[0] + 1.0).abs() < 1e-12);
        assert!((values[1] - 1.0).abs() < 1e-12);
        let yv = matmul(y.as_ref(), vectors.as_ref());
        for k in 0..2 {
            for i in 0..2 {
                assert!((yv[(i, k)] - vectors[(i, k)] * values[k]).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_qr_reconstructs() {
        // tall, wide and square inputs
        for (m, n) in [(3, 2), (6, 4), (2, 5), (4, 4)] {
            let a = Mat::from_fn(m, n, |i, j| {
                c((i + 2 * j) as f64 + 0.5, (i * j) as f64 - 1.0)
            });
            let (q, r) = qr(a.as_ref());
            assert_eq!((q.nrows(), q.ncols()), (m, m));
            assert_eq!((r.nrows(), r.ncols()), (m, n));
            let back = matmul(q.as_ref(), r.as_ref());
            for i in 0..m {
                for j in 0..n {
                    assert!((back[(i, j)] - a[(i, j)]).norm() < 1e-12);
                    if i > j {
                        assert_eq!(r[(i, j)], c(0.0, 0.0));
                    }
                }
            }
        }
    }
}
