//! Hash primitives and the Bitcoin "Signed Message" framing BitID signs over.

use num_bigint::BigUint;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

const BITCOIN_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// `SHA256(SHA256(x))`
pub fn hash256(data: &[u8]) -> [u8; 32] {
    let once = Sha256::digest(data);
    Sha256::digest(once).into()
}

/// `RIPEMD160(SHA256(x))`
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// Bitcoin's variable-length integer encoding.
pub fn var_int(value: u64) -> Vec<u8> {
    if value < 253 {
        vec![value as u8]
    } else if value < 0x1_0000 {
        let mut out = vec![0xFD];
        out.extend_from_slice(&(value as u16).to_le_bytes());
        out
    } else if value < 0x1_0000_0000 {
        let mut out = vec![0xFE];
        out.extend_from_slice(&(value as u32).to_le_bytes());
        out
    } else {
        let mut out = vec![0xFF];
        out.extend_from_slice(&value.to_le_bytes());
        out
    }
}

/// Computes the 32-byte digest BitID signatures are made over:
/// `HASH256(prefix || VarInt(len(message)) || message)`, returned as a
/// big-endian integer per the compact-signature recovery equations.
pub fn bitid_message_digest(message: &str) -> BigUint {
    let message_bytes = message.as_bytes();
    let mut framed = Vec::with_capacity(
        BITCOIN_SIGNED_MESSAGE_PREFIX.len() + 9 + message_bytes.len(),
    );
    framed.extend_from_slice(BITCOIN_SIGNED_MESSAGE_PREFIX);
    framed.extend_from_slice(&var_int(message_bytes.len() as u64));
    framed.extend_from_slice(message_bytes);
    BigUint::from_bytes_be(&hash256(&framed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_int_boundaries() {
        assert_eq!(var_int(0), vec![0]);
        assert_eq!(var_int(252), vec![252]);
        assert_eq!(var_int(253), vec![0xFD, 253, 0]);
        assert_eq!(var_int(0xFFFF), vec![0xFD, 0xFF, 0xFF]);
        assert_eq!(var_int(0x1_0000), vec![0xFE, 0, 0, 1, 0]);
        assert_eq!(
            var_int(0x1_0000_0000),
            vec![0xFF, 0, 0, 0, 0, 1, 0, 0, 0]
        );
    }

    #[test]
    fn digest_is_deterministic_and_message_sensitive() {
        let a = bitid_message_digest("bitid://localhost/callback?x=abc");
        let b = bitid_message_digest("bitid://localhost/callback?x=abc");
        let c = bitid_message_digest("bitid://localhost/callback?x=def");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash160_is_ripemd_of_sha256() {
        let data = b"hello";
        let expected = Ripemd160::digest(Sha256::digest(data));
        assert_eq!(hash160(data), expected.as_slice());
    }
}
