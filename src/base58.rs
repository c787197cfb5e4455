//! Base58Check: Base58 (via the `bs58` crate, which already handles the
//! alphabet and leading-zero-byte-to-`'1'` translation) plus the version byte
//! and double-SHA256 checksum framing BitID addresses rely on.

use crate::error::BitIdError;
use crate::hash::hash256;

/// Encodes `version || payload || checksum` where
/// `checksum = HASH256(version || payload)[..4]`.
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    let mut buf = Vec::with_capacity(1 + payload.len() + 4);
    buf.push(version);
    buf.extend_from_slice(payload);
    let checksum = hash256(&buf);
    buf.extend_from_slice(&checksum[..4]);
    bs58::encode(buf).into_string()
}

/// Decodes a Base58Check string, verifying the checksum, and returns
/// `(version_byte, payload)`.
pub fn decode_check(s: &str) -> Result<(u8, Vec<u8>), BitIdError> {
    let decoded = bs58::decode(s)
        .into_vec()
        .map_err(|e| BitIdError::MalformedAddress(format!("invalid base58: {e}")))?;

    if decoded.len() < 5 {
        return Err(BitIdError::MalformedAddress(
            "base58 payload too short for version + checksum".to_string(),
        ));
    }

    let (body, checksum) = decoded.split_at(decoded.len() - 4);
    let expected = hash256(body);
    if &expected[..4] != checksum {
        return Err(BitIdError::MalformedAddress(
            "checksum mismatch".to_string(),
        ));
    }

    Ok((body[0], body[1..].to_vec()))
}

/// Extracts just the version byte of a Base58Check-encoded value, for
/// network discrimination, without re-validating the whole checksum twice
/// when a caller already called [`decode_check`].
pub fn version_byte(s: &str) -> Result<u8, BitIdError> {
    decode_check(s).map(|(version, _)| version)
}
