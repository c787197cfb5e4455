//! Compact Bitcoin signature codec: Base64 of `v || r(32 BE) || s(32 BE)`.

use base64::Engine;
use num_bigint::BigUint;

use crate::curve::N;
use crate::error::BitIdError;

/// A parsed 65-byte compact signature.
#[derive(Debug, Clone)]
pub struct CompactSignature {
    pub v: u8,
    pub r: BigUint,
    pub s: BigUint,
}

impl CompactSignature {
    /// Recovery id in `0..=3`, derived from `v`.
    pub fn recovery_id(&self) -> u8 {
        (self.v - 27) % 4
    }

    /// `v in [31, 34]` signs a compressed public key, `v in [27, 30]` an
    /// uncompressed one.
    pub fn is_compressed(&self) -> bool {
        self.v >= 31
    }
}

/// Decodes a Base64 compact signature, enforcing every invariant from the
/// data model before any curve arithmetic is attempted: exactly 65 bytes,
/// `v` in `[27, 34]`, and `r, s` in `[1, n-1]`.
pub fn decode_signature(sig_base64: &str) -> Result<CompactSignature, BitIdError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(sig_base64.trim())
        .map_err(|e| BitIdError::MalformedSignature(format!("invalid base64: {e}")))?;

    if bytes.len() != 65 {
        return Err(BitIdError::MalformedSignature(format!(
            "expected 65 bytes, got {}",
            bytes.len()
        )));
    }

    let v = bytes[0];
    if !(27..=34).contains(&v) {
        return Err(BitIdError::MalformedSignature(format!(
            "recovery header {v} out of range [27, 34]"
        )));
    }

    let r = BigUint::from_bytes_be(&bytes[1..33]);
    let s = BigUint::from_bytes_be(&bytes[33..65]);

    let one = BigUint::from(1u8);
    if r < one || r >= *N || s < one || s >= *N {
        return Err(BitIdError::MalformedSignature(
            "r or s outside [1, n-1]".to_string(),
        ));
    }

    Ok(CompactSignature { v, r, s })
}
