//! secp256k1 group: `y^2 = x^3 + 7` over `GF(p)`.
//!
//! Curve parameters are fixed constants, parsed once into module-scope
//! `LazyLock` statics rather than re-derived per call — there is no runtime
//! configuration path that can change them.

use std::sync::LazyLock;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::bigint::{add_mod, inv_mod, mul_mod, sub_mod};

fn hex_const(s: &str) -> BigUint {
    BigUint::parse_bytes(s.as_bytes(), 16).expect("hard-coded curve constant must parse")
}

/// Field prime `p = 2^256 - 2^32 - 977`.
pub static P: LazyLock<BigUint> = LazyLock::new(|| {
    hex_const("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F")
});

/// Group order `n`.
pub static N: LazyLock<BigUint> = LazyLock::new(|| {
    hex_const("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141")
});

/// Generator point `G`.
pub static G: LazyLock<Point> = LazyLock::new(|| {
    Point::Affine(
        hex_const("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798"),
        hex_const("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"),
    )
});

/// Curve coefficient `b` in `y^2 = x^3 + a*x + b` (secp256k1 has `a = 0`).
pub const B_COEFF: u8 = 7;

/// A point on secp256k1, or the point at infinity.
///
/// Using a tagged variant instead of the classic `(0, 0)` sentinel (safe only
/// because `(0, 0)` never satisfies the curve equation, but easy to get
/// subtly wrong) makes "is this the identity" a compile-time-checked match
/// instead of a magic-value comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine(BigUint, BigUint),
}

impl Point {
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine(x, _) => Some(x),
        }
    }

    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Point::Infinity => None,
            Point::Affine(_, y) => Some(y),
        }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// `-P`, i.e. the reflection of `P` across the x-axis.
    pub fn negate(&self) -> Point {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Affine(x, y) => {
                if y.is_zero() {
                    Point::Affine(x.clone(), y.clone())
                } else {
                    Point::Affine(x.clone(), &*P - y)
                }
            }
        }
    }
}

/// `P1 + P2` using the standard affine addition/doubling formulas mod `p`.
///
/// Returns `Point::Infinity` if a slope computation would require inverting
/// zero (the two points are mutual inverses) — that is a valid curve
/// outcome, not a caller error, so it is never reported upward as one.
pub fn point_add(p1: &Point, p2: &Point) -> Point {
    match (p1, p2) {
        (Point::Infinity, _) => p2.clone(),
        (_, Point::Infinity) => p1.clone(),
        (Point::Affine(x1, y1), Point::Affine(x2, y2)) => {
            if x1 == x2 {
                if y1 == y2 {
                    return point_double(p1);
                }
                return Point::Infinity;
            }
            let dx = sub_mod(x2, x1, &P);
            let dy = sub_mod(y2, y1, &P);
            let Some(dx_inv) = inv_mod(&dx, &P) else {
                return Point::Infinity;
            };
            let m = mul_mod(&dy, &dx_inv, &P);
            let x3 = sub_mod(&sub_mod(&mul_mod(&m, &m, &P), x1, &P), x2, &P);
            let y3 = sub_mod(&mul_mod(&m, &sub_mod(x1, &x3, &P), &P), y1, &P);
            Point::Affine(x3, y3)
        }
    }
}

/// `2 * P`
pub fn point_double(p: &Point) -> Point {
    match p {
        Point::Infinity => Point::Infinity,
        Point::Affine(x, y) => {
            if y.is_zero() {
                return Point::Infinity;
            }
            let three_x_sq = mul_mod(&BigUint::from(3u8), &mul_mod(x, x, &P), &P);
            let two_y = mul_mod(&BigUint::from(2u8), y, &P);
            let Some(two_y_inv) = inv_mod(&two_y, &P) else {
                return Point::Infinity;
            };
            let m = mul_mod(&three_x_sq, &two_y_inv, &P);
            let x3 = sub_mod(&mul_mod(&m, &m, &P), &add_mod(x, x, &P), &P);
            let y3 = sub_mod(&mul_mod(&m, &sub_mod(x, &x3, &P), &P), y, &P);
            Point::Affine(x3, y3)
        }
    }
}

/// `k * point`, scalar reduced mod `n` first, via iterative double-and-add
/// over the scalar's bits starting from the least-significant bit (avoiding
/// the deep recursion a naive `n == 0 -> O; n == 1 -> P; else recurse`
/// translation of the textbook definition would produce).
pub fn scalar_mul(k: &BigUint, point: &Point) -> Point {
    let k = k % &*N;
    scalar_mul_raw(&k, point)
}

/// `k * point`, without first reducing `k` mod `n`. Used by [`has_order_n`],
/// where the caller passes `n` itself as `k` and a mod-`n` reduction up
/// front would turn the check into a no-op.
fn scalar_mul_raw(k: &BigUint, point: &Point) -> Point {
    let mut result = Point::Infinity;
    let mut addend = point.clone();
    let bits = k.bits();
    for i in 0..bits {
        if k.bit(i) {
            result = point_add(&result, &addend);
        }
        addend = point_double(&addend);
    }
    result
}

/// Whether `point` has order `n` (i.e. `n * point == Infinity`), the check
/// `recover_public_key` uses to reject a candidate `R` that isn't a genuine
/// curve point of the expected order.
pub fn has_order_n(point: &Point) -> bool {
    scalar_mul_raw(&N, point).is_infinity()
}

/// `alpha = x^3 + 7 (mod p)`, the right-hand side of the curve equation.
pub fn curve_rhs(x: &BigUint) -> BigUint {
    let x2 = mul_mod(x, x, &P);
    let x3 = mul_mod(&x2, x, &P);
    add_mod(&x3, &BigUint::from(B_COEFF), &P)
}

/// Whether `(x, y)` satisfies `y^2 = x^3 + 7 (mod p)`.
pub fn is_on_curve(x: &BigUint, y: &BigUint) -> bool {
    mul_mod(y, y, &P) == curve_rhs(x)
}
