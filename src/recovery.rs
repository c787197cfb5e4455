//! Public-key recovery from a compact signature, and the ECDSA verification
//! equation against a recovered candidate.
//!
//! Implemented directly over `bigint`/`curve` rather than delegated to a
//! vetted secp256k1 binding. The recovery equation and recovery-id/parity
//! convention here match the standard SEC1 §4.1.6 recovery algorithm (the
//! same one libsecp256k1's `ecdsa_recover` and the Python `pybitid`
//! reference implementation's `ecdsa_raw_recover` compute, modulo
//! `pybitid`'s shortcut of never adjusting `x` for `recid >= 2`).

use num_bigint::BigUint;
use num_traits::Zero;

use crate::bigint::{inv_mod, mul_mod, sqrt_mod_p3mod4};
use crate::curve::{curve_rhs, has_order_n, point_add, scalar_mul, Point, G, N, P};
use crate::error::BitIdError;
use crate::signature::CompactSignature;

/// Recovers the public key point `Q` such that `(digest, sig)` is a valid
/// ECDSA signature under `Q`.
pub fn recover_public_key(digest: &BigUint, sig: &CompactSignature) -> Result<Point, BitIdError> {
    let recid = sig.recovery_id();

    // Step 2: candidate x, adjusted by n for the high bit of recid.
    let x = if recid >= 2 {
        (&sig.r + &*N) % &*P
    } else {
        &sig.r % &*P
    };

    // Step 3: y from the curve equation, choosing the root matching recid's parity bit.
    let alpha = curve_rhs(&x);
    let beta = sqrt_mod_p3mod4(&alpha, &P);
    if mul_mod(&beta, &beta, &P) != alpha {
        return Err(BitIdError::PointNotOnCurve);
    }
    let beta_is_odd = beta.bit(0);
    let recid_wants_odd = recid % 2 == 1;
    let y = if beta_is_odd == recid_wants_odd {
        beta
    } else {
        &*P - &beta
    };

    let r_point = Point::Affine(x, y);

    // Step 4: sanity check the candidate has the expected order (always true
    // for a genuine curve point on secp256k1, whose cofactor is 1, but kept
    // as an explicit invariant check rather than assumed).
    if !has_order_n(&r_point) {
        return Err(BitIdError::PointNotOnCurve);
    }

    // Step 5: Q = r^-1 * (s*R - e*G)
    let r_inv = inv_mod(&sig.r, &N).ok_or(BitIdError::PointNotOnCurve)?;
    let s_r = scalar_mul(&sig.s, &r_point);
    let e_g = scalar_mul(digest, &G);
    let diff = point_add(&s_r, &e_g.negate());
    let q = scalar_mul(&r_inv, &diff);

    if q.is_infinity() {
        return Err(BitIdError::VerificationFailed);
    }

    verify_ecdsa(digest, sig, &q)?;
    Ok(q)
}

/// Step 6: standard ECDSA verification of `(digest, sig)` against `q`.
pub fn verify_ecdsa(
    digest: &BigUint,
    sig: &CompactSignature,
    q: &Point,
) -> Result<(), BitIdError> {
    let w = inv_mod(&sig.s, &N).ok_or(BitIdError::VerificationFailed)?;
    let u1 = mul_mod(digest, &w, &N);
    let u2 = mul_mod(&sig.r, &w, &N);

    let point = point_add(&scalar_mul(&u1, &G), &scalar_mul(&u2, q));
    let Point::Affine(x, _) = point else {
        return Err(BitIdError::VerificationFailed);
    };

    if (x % &*N) == sig.r {
        Ok(())
    } else {
        Err(BitIdError::VerificationFailed)
    }
}

/// Encodes a recovered public key point as SEC1 bytes, compressed (33 bytes:
/// `0x02`/`0x03` || x) or uncompressed (65 bytes: `0x04` || x || y).
pub fn encode_pubkey(q: &Point, compressed: bool) -> Result<Vec<u8>, BitIdError> {
    let Point::Affine(x, y) = q else {
        return Err(BitIdError::PointNotOnCurve);
    };
    let x_bytes = to_be_32(x);
    if compressed {
        let prefix = if y.bit(0) { 0x03 } else { 0x02 };
        let mut out = Vec::with_capacity(33);
        out.push(prefix);
        out.extend_from_slice(&x_bytes);
        Ok(out)
    } else {
        let y_bytes = to_be_32(y);
        let mut out = Vec::with_capacity(65);
        out.push(0x04);
        out.extend_from_slice(&x_bytes);
        out.extend_from_slice(&y_bytes);
        Ok(out)
    }
}

/// Fixed-width 32-byte big-endian encoding of a field element.
fn to_be_32(n: &BigUint) -> [u8; 32] {
    let bytes = n.to_bytes_be();
    let mut out = [0u8; 32];
    debug_assert!(bytes.len() <= 32);
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::is_on_curve;

    #[test]
    fn pubkey_round_trip_compressed_to_uncompressed() {
        let q = scalar_mul(&BigUint::from(12345u32), &G);
        let compressed = encode_pubkey(&q, true).unwrap();
        let Point::Affine(x, y) = &q else {
            unreachable!()
        };
        assert!(is_on_curve(x, y));
        assert_eq!(compressed.len(), 33);
        assert!(compressed[0] == 0x02 || compressed[0] == 0x03);

        let uncompressed = encode_pubkey(&q, false).unwrap();
        assert_eq!(uncompressed.len(), 65);
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(&uncompressed[1..33], &compressed[1..33]);
    }

    #[test]
    fn encode_pubkey_rejects_infinity() {
        assert!(encode_pubkey(&Point::Infinity, true).is_err());
    }

    #[test]
    fn zero_digest_is_not_special_cased_into_panics() {
        // Regression guard: a zero `e` must flow through scalar_mul (which
        // already handles a zero scalar as producing Infinity) without panicking.
        let digest = BigUint::zero();
        let e_g = scalar_mul(&digest, &G);
        assert!(e_g.is_infinity());
    }
}
