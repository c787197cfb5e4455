//! Error kinds for the BitID verification pipeline.

use thiserror::Error;

/// Everything that can go wrong while building a challenge or verifying a response.
///
/// [`BitIdError::InvalidCallback`] and [`BitIdError::MalformedUri`] are the two variants
/// meant to reach an embedding application as error values, from [`crate::build_uri`] and
/// [`crate::parse`] respectively — both programmer-facing surfaces for inspecting a URI,
/// not the verification path. Every other variant is produced internally during
/// [`crate::signature_valid`] / [`crate::address_valid`] / [`crate::uri_valid`] and
/// collapsed to `false` at the façade boundary, per the protocol's no-oracle-leak policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitIdError {
    /// `build_uri` was given a callback URI missing a scheme, host, or path.
    #[error("invalid callback uri: {0}")]
    InvalidCallback(String),

    /// A compact signature was not valid Base64, not 65 bytes, or carried `v` out of range.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// A Base58Check address failed to decode, failed its checksum, or carried an
    /// unexpected version byte.
    #[error("malformed address: {0}")]
    MalformedAddress(String),

    /// Signature recovery produced no point on the curve for the given `(r, v)`.
    #[error("recovered point is not on the curve")]
    PointNotOnCurve,

    /// The ECDSA verification equation did not hold, or the recovered address
    /// differed from the one the caller supplied.
    #[error("signature verification failed")]
    VerificationFailed,

    /// A BitID URI failed one of the structural checks in `uri_valid`.
    #[error("malformed bitid uri: {0}")]
    MalformedUri(String),
}

pub type Result<T> = std::result::Result<T, BitIdError>;
