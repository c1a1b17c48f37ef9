//! Exact binomial coefficients.

/// Exact binomial coefficient `C(n, k)`.
///
/// Returns `Some(0)` for `k > n` and `None` if the result does not fit in
/// `usize`. Intermediate products are carried in `u128`, and every partial
/// product `C(n, i)` is itself a binomial coefficient, so the division is
/// always exact.
///
/// # Example
/// ```
/// use slater_enum::binomial;
///
/// assert_eq!(binomial(6, 2), Some(15));
/// assert_eq!(binomial(3, 5), Some(0));
/// assert_eq!(binomial(64, 32), Some(1_832_624_140_942_590_534));
/// assert_eq!(binomial(200, 100), None);
/// ```
pub fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
        if acc > usize::MAX as u128 {
            return None;
        }
    }
    usize::try_from(acc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values() {
        assert_eq!(binomial(0, 0), Some(1));
        assert_eq!(binomial(5, 0), Some(1));
        assert_eq!(binomial(5, 5), Some(1));
        assert_eq!(binomial(6, 3), Some(20));
        assert_eq!(binomial(10, 4), Some(210));
    }

    #[test]
    fn test_pascal_rule() {
        for n in 1..40 {
            for k in 1..n {
                assert_eq!(
                    binomial(n, k),
                    Some(binomial(n - 1, k - 1).unwrap() + binomial(n - 1, k).unwrap())
                );
            }
        }
    }

    #[test]
    fn test_exact_beyond_f64_mantissa() {
        // 2^53 < C(60, 30) < 2^64
        assert_eq!(binomial(60, 30), Some(118_264_581_564_861_424));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(binomial(100, 50), None);
    }
}
