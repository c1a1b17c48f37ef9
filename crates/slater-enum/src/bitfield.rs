//! Bit-string representation of fermionic occupations.
//!
//! Orbital `k` occupied means bit `k` set.

/// Occupation bit string
pub type Bitfield = u64;

/// Largest number of orbitals a [`Bitfield`] can hold
pub const MAX_ORBITALS: usize = Bitfield::BITS as usize;

/// Lowest set bit of `x` (zero if `x == 0`)
#[inline]
pub fn last_bit(x: Bitfield) -> Bitfield {
    x & x.wrapping_neg()
}

/// Next larger bit string with the same population count.
///
/// Gosper's hack: the lowest block of ones moves its leading bit one place
/// up and the rest of the block drops to the bottom, e.g.
/// `0b0111_1000 -> 0b1000_0111`.
#[inline]
pub fn next_same_popcount(f: Bitfield) -> Bitfield {
    debug_assert!(f != 0);
    let t = f | f.wrapping_sub(1);
    let next_hi = t.wrapping_add(1);
    let low = (!t & next_hi).wrapping_sub(1) >> (f.trailing_zeros() + 1);
    next_hi | low
}

/// Encode a list of orbitals; repeated orbitals collapse onto one bit.
pub fn encode(orbitals: &[usize]) -> Bitfield {
    orbitals.iter().fold(0, |w, &k| w | (1 << k))
}

/// Decode a bit string into its occupied orbitals, ascending.
pub fn decode(w: Bitfield) -> Vec<usize> {
    let mut out = Vec::with_capacity(w.count_ones() as usize);
    let mut rest = w;
    while rest != 0 {
        out.push(rest.trailing_zeros() as usize);
        rest &= rest - 1;
    }
    out
}

/// Sign of annihilating the orbitals `a` from the Slater determinant `n`.
///
/// Returns 0 if `a` is not a subset of `n`. Otherwise the sign is the parity
/// of the number of pairs `(t, w)` with `t` in `a`, `w` in `n \ a` and
/// `w < t`, i.e. the sign of moving the particles of `a` to the front of the
/// ascending creation string of `n`. Creating `c` on a determinant `r`
/// carries `annihilation_sign(r | c, c)`.
pub fn annihilation_sign(n: Bitfield, a: Bitfield) -> i8 {
    if n & a != a {
        return 0;
    }
    let rest = n ^ a;
    let mut b = a;
    let mut count = 0u32;
    while b != 0 {
        let t = last_bit(b);
        count += (rest & (t - 1)).count_ones();
        b ^= t;
    }
    if count & 1 == 0 {
        1
    } else {
        -1
    }
}
