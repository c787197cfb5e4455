//! Modular arithmetic shared by the field (mod `P`) and scalar (mod `N`) layers
//! of secp256k1. Kept generic over the modulus so `curve.rs` doesn't need two
//! copies of the same formulas.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

/// `a + b (mod m)`
pub fn add_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `a - b (mod m)`, always returning a value in `[0, m)`.
pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// `a * b (mod m)`
pub fn mul_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `a^2 (mod m)`
pub fn sqr_mod(a: &BigUint, m: &BigUint) -> BigUint {
    mul_mod(a, a, m)
}

/// Modular inverse of `a` mod `m` via the extended Euclidean algorithm.
///
/// Returns `None` iff `gcd(a, m) != 1`, which for the groups this module is
/// used with (a prime field and a prime-order scalar group) only happens for
/// `a == 0 (mod m)`.
pub fn inv_mod(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return None;
    }
    let m_i = BigInt::from(m.clone());
    let (mut old_r, mut r) = (BigInt::from(a % m), m_i.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let q = &old_r / &r;
        let new_r = &old_r - &q * &r;
        old_r = r;
        r = new_r;
        let new_s = &old_s - &q * &s;
        old_s = s;
        s = new_s;
    }

    if old_r != BigInt::one() {
        return None;
    }

    let mut inv = old_s % &m_i;
    if inv.is_negative() {
        inv += &m_i;
    }
    inv.to_biguint()
}

/// Modular square root of `a` mod `p`, valid only for `p ≡ 3 (mod 4)` (true for
/// secp256k1's field prime). Returns the principal root; callers must verify
/// `root * root mod p == a` since this shortcut gives a meaningless result
/// when `a` is not actually a quadratic residue.
pub fn sqrt_mod_p3mod4(a: &BigUint, p: &BigUint) -> BigUint {
    let exp = (p + BigUint::one()) / BigUint::from(4u8);
    a.modpow(&exp, p)
}
